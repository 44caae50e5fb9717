mod pack;


pub use pack::{estimate_tokens, pack, PackPolicy};
