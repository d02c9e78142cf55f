//! Small hand drawn layouts shared by the unit tests.

use crate::layout::Layout;

// Every element in a corner, nothing but the border
pub const OPEN: &str = "\
+-+-+-+-+-+
|S . . . 1|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|2 . . . G|
+-+-+-+-+-+";

// Twelve moves at best
pub const WALLED: &str = "\
+-+-+-+-+-+
|S . . . 2|
+-+ + +-+ +
|. .|1 .|.|
+ + + + + +
|. . . .|.|
+ +-+ + + +
|. . . . .|
+ + +-+ + +
|. . . . G|
+-+-+-+-+-+";

// Start and goal are boxed in together, the collectibles can't be reached
pub const SEALED: &str = "\
+-+-+-+
|S G|1|
+-+-+ +
|. . .|
+ + + +
|2 . .|
+-+-+-+";

// Goal sits between the collectibles on the top row
pub const PASS_THROUGH: &str = "\
+-+-+-+-+-+
|2 . G . 1|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . S|
+-+-+-+-+-+";

// Sliding east from the start crosses the second collectible and then the goal
pub const MID_SLIDE: &str = "\
+-+-+-+-+-+
|S 2 . G .|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|1 . . . .|
+-+-+-+-+-+";

pub fn read(input: &str) -> Layout {
    Layout::read(&mut input.as_bytes()).unwrap()
}

pub fn open_world() -> Layout {
    read(OPEN)
}

pub fn walled_world() -> Layout {
    read(WALLED)
}

pub fn sealed_world() -> Layout {
    read(SEALED)
}

pub fn pass_through_world() -> Layout {
    read(PASS_THROUGH)
}

pub fn mid_slide_world() -> Layout {
    read(MID_SLIDE)
}
