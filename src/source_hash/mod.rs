pub mod core;
mod clock;


pub use self::core::{
    hash_buffer, hash_file, hash_file_default, is_precompiled_header_default, ScanConfig,
};
