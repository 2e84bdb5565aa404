//! Vidscope Client - HTTP collaborators
//!
//! Implements the search/index collaborator ([`HttpBackend`]) and the asset
//! server URL scheme ([`HttpAssets`]) against the video-forensics REST API:
//!
//! | Call | Endpoint |
//! |------|----------|
//! | search | `GET {base}/search?query=..&start_date=..&end_date=..&camera_id=..` |
//! | catalog | `GET {base}/videos` |
//! | processing | `POST {base}/process` |
//! | clip | `{base}/video_segment?video_path=..&start_time=..&end_time=..` |
//! | screenshot | `{base}/screenshot/{id}` |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assets;
pub mod backend;
pub mod types;

#[cfg(test)]
mod tests;

pub use assets::HttpAssets;
pub use backend::{parse_base_url, HttpBackend};
pub use types::{HttpBackendConfig, DEFAULT_BASE_URL};
