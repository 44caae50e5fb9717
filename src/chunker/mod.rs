mod window;


pub use window::{chunk, Window};
