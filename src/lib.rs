//! qqwry-rs: reader for the qqwry (纯真) IPv4 geolocation database
//!
//! Decodes the proprietary qqwry binary format: an 8-byte header, a sorted
//! index of 7-byte range records, and a record area of GB18030 C-strings
//! deduplicated through redirect pointers. Lookups map a dotted-quad IPv4
//! address to the range covering it and split the decoded text into
//! country/province/city/ISP fields.
//!
//! The database is read-only after loading and safe to share across threads.
//! A corrupt or adversarial database degrades lookups to empty fields; it
//! never panics and never reads outside the loaded buffer.
//!
//! # Usage
//!
//! ```no_run
//! use qqwry_rs::Database;
//!
//! # fn main() -> qqwry_rs::Result<()> {
//! let db = Database::from_path("qqwry.dat")?;
//!
//! let zone = db.find_ip("127.0.0.1")?;
//! println!("{}, {}", zone.main_info, zone.sub_info);
//! // IANA，保留地址用于本地回送
//!
//! let location = db.get_location("1.2.4.8")?;
//! println!("{} {} {}", location.province, location.city, location.isp);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod location;
pub mod utils;

pub use database::record::ZonePair;
pub use database::Database;
pub use error::{QqwryError, Result};
pub use location::Location;
