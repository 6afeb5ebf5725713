//! Small pure helpers shared across operations

pub mod utils;

pub use utils::{
    extract_remote_image_path, group_by_local_date, local_day_bounds_utc, remote_image_path,
    GroupedEntries, IMAGES_PREFIX,
};
