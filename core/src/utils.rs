mod hash;
pub use hash::*;

mod iter;
pub use iter::*;

mod string;
pub use string::*;

mod test;
pub use test::*;
