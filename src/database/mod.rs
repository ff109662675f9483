//! qqwry database loading and lookup
//!
//! The database is loaded once into an immutable buffer and is then safe to
//! share across threads: every lookup is a pure, synchronous computation
//! over that buffer with no shared mutable state.
//!
//! # Module Organization
//!
//! - `buffer`: bounds-checked view over the raw bytes
//! - `index`: binary search over the sorted range index
//! - `record`: redirect-mode record decoding

pub mod buffer;
pub mod index;
pub mod record;

use std::fs::File;
use std::net::Ipv4Addr;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{QqwryError, Result};
use crate::location::{self, Location};
use crate::utils::addr::parse_ipv4;
use buffer::ByteView;
use index::INDEX_RECORD_LEN;
use record::ZonePair;

/// A loaded qqwry database
pub struct Database {
    view: ByteView,
    index_head: u32,
    index_tail: u32,
}

impl Database {
    /// Load a database from fully read qqwry.dat bytes.
    ///
    /// Fails with `Truncated` when the bytes cannot hold the 8-byte header.
    /// An empty index is not a load error; lookups against it return empty
    /// results.
    pub fn load(bytes: Vec<u8>) -> Result<Self> {
        Self::from_view(ByteView::from_vec(bytes))
    }

    /// Load a database by memory-mapping a qqwry.dat file read-only.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::info!("Loading qqwry database from: {}", path.as_ref().display());
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file) }?;
        Self::from_view(ByteView::from_mmap(mmap))
    }

    fn from_view(view: ByteView) -> Result<Self> {
        if view.len() < 8 {
            return Err(QqwryError::Truncated(view.len()));
        }

        let index_head = view.read_u32_le(0)?;
        let index_tail = view.read_u32_le(4)?;

        let db = Self {
            view,
            index_head,
            index_tail,
        };
        log::info!("Loaded qqwry database: {} index records", db.record_count());
        Ok(db)
    }

    /// Number of records in the range index
    pub fn record_count(&self) -> u32 {
        if self.index_tail <= self.index_head {
            return 0;
        }
        (self.index_tail - self.index_head) / INDEX_RECORD_LEN + 1
    }

    /// Look up the raw string pair for a dotted-quad IPv4 address.
    ///
    /// The only error is `InvalidAddress` for malformed input, raised before
    /// any buffer access. An empty or corrupt database degrades to an
    /// all-empty pair.
    pub fn find_ip(&self, ip: &str) -> Result<ZonePair> {
        let ip_num = parse_ipv4(ip)?;
        Ok(self.lookup(ip_num))
    }

    /// Look up the raw string pair for an already parsed IPv4 address
    pub fn find(&self, ip: Ipv4Addr) -> ZonePair {
        self.lookup(u32::from_be_bytes(ip.octets()))
    }

    /// Look up the structured location for a dotted-quad IPv4 address
    pub fn get_location(&self, ip: &str) -> Result<Location> {
        let pair = self.find_ip(ip)?;
        Ok(location::classify(ip, &pair))
    }

    fn lookup(&self, ip: u32) -> ZonePair {
        match index::search(&self.view, self.index_head, self.index_tail, ip) {
            Ok(Some(entry)) => record::decode(&self.view, &entry),
            Ok(None) => ZonePair::default(),
            Err(err) => {
                log::debug!("index search failed for {ip:#x}: {err}");
                ZonePair::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::GB18030;
    use std::io::Write;

    /// Builds a minimal but structurally complete qqwry.dat image.
    struct DbBuilder {
        data: Vec<u8>,
        index: Vec<(u32, u32)>,
    }

    impl DbBuilder {
        fn new() -> Self {
            Self {
                data: vec![0u8; 8],
                index: Vec::new(),
            }
        }

        fn gb(text: &str) -> Vec<u8> {
            GB18030.encode(text).0.into_owned()
        }

        /// Add a range with inline main/sub strings.
        fn add_range(&mut self, min: u32, max: u32, main: &str, sub: &str) -> &mut Self {
            let record = self.data.len() as u32;
            self.data.extend_from_slice(&max.to_le_bytes());
            self.data.extend_from_slice(&Self::gb(main));
            self.data.push(0);
            self.data.extend_from_slice(&Self::gb(sub));
            self.data.push(0);
            self.index.push((min, record));
            self
        }

        fn build(mut self) -> Vec<u8> {
            let head = self.data.len() as u32;
            for (min, record) in &self.index {
                self.data.extend_from_slice(&min.to_le_bytes());
                self.data.extend_from_slice(&record.to_le_bytes()[..3]);
            }
            let tail = if self.index.is_empty() {
                head
            } else {
                head + (self.index.len() as u32 - 1) * INDEX_RECORD_LEN
            };
            self.data[0..4].copy_from_slice(&head.to_le_bytes());
            self.data[4..8].copy_from_slice(&tail.to_le_bytes());
            self.data
        }
    }

    fn sample_db() -> Database {
        let mut builder = DbBuilder::new();
        builder
            .add_range(0x00000000, 0x00FFFFFF, "IANA，保留地址用于本地回送", "")
            .add_range(0x01000000, 0x01FFFFFF, "广东省广州市", "中国电信")
            .add_range(0x02000000, 0x02FFFFFF, "北京市", "联通")
            .add_range(0x03000000, 0xFFFFFFFF, "澳大利亚", "");
        Database::load(builder.build()).unwrap()
    }

    #[test]
    fn test_load_truncated() {
        assert!(matches!(
            Database::load(vec![0u8; 7]),
            Err(QqwryError::Truncated(7))
        ));
        assert!(Database::load(Vec::new()).is_err());
    }

    #[test]
    fn test_find_ip() {
        let db = sample_db();
        let pair = db.find_ip("1.2.3.4").unwrap();
        assert_eq!(pair.main_info, "广东省广州市");
        assert_eq!(pair.sub_info, "中国电信");

        let pair = db.find_ip("2.0.0.1").unwrap();
        assert_eq!(pair.main_info, "北京市");
        assert_eq!(pair.sub_info, "联通");
    }

    #[test]
    fn test_find_typed_address() {
        let db = sample_db();
        let pair = db.find(Ipv4Addr::new(3, 0, 0, 1));
        assert_eq!(pair.main_info, "澳大利亚");
        assert_eq!(pair.sub_info, "");
    }

    #[test]
    fn test_get_location() {
        let db = sample_db();

        let loc = db.get_location("1.2.3.4").unwrap();
        assert_eq!(loc.ip, "1.2.3.4");
        assert_eq!(loc.country, "中国");
        assert_eq!(loc.province, "广东");
        assert_eq!(loc.city, "广州");
        assert_eq!(loc.isp, "电信");

        let loc = db.get_location("2.0.0.1").unwrap();
        assert_eq!(loc.country, "中国");
        assert_eq!(loc.province, "北京");
        assert_eq!(loc.city, "北京");
        assert_eq!(loc.isp, "联通");

        let loc = db.get_location("3.3.3.3").unwrap();
        assert_eq!(loc.country, "澳大利亚");
        assert_eq!(loc.province, "");
        assert_eq!(loc.city, "");
    }

    #[test]
    fn test_invalid_address() {
        let db = sample_db();
        assert!(matches!(
            db.find_ip("1.2.3"),
            Err(QqwryError::InvalidAddress(_))
        ));
        assert!(db.get_location("1.2.3.4.5").is_err());
        assert!(db.find_ip("300.1.1.1").is_err());
    }

    #[test]
    fn test_lookups_are_idempotent() {
        let db = sample_db();
        let first = db.find_ip("2.0.0.1").unwrap();
        let first_loc = db.get_location("2.0.0.1").unwrap();
        for _ in 0..8 {
            assert_eq!(db.find_ip("2.0.0.1").unwrap(), first);
            assert_eq!(db.get_location("2.0.0.1").unwrap(), first_loc);
        }
    }

    #[test]
    fn test_empty_index() {
        // header only, index head == tail
        let mut data = vec![0u8; 8];
        data[0..4].copy_from_slice(&8u32.to_le_bytes());
        data[4..8].copy_from_slice(&8u32.to_le_bytes());
        let db = Database::load(data).unwrap();
        assert_eq!(db.record_count(), 0);

        let pair = db.find_ip("1.2.3.4").unwrap();
        assert_eq!(pair, ZonePair::default());

        let loc = db.get_location("1.2.3.4").unwrap();
        assert_eq!(loc.ip, "1.2.3.4");
        assert_eq!(loc.country, "");
        assert_eq!(loc.province, "");
        assert_eq!(loc.city, "");
        assert_eq!(loc.isp, "");
    }

    #[test]
    fn test_record_count() {
        let db = sample_db();
        assert_eq!(db.record_count(), 4);
    }

    #[test]
    fn test_from_path() {
        let mut builder = DbBuilder::new();
        builder
            .add_range(0x00000000, 0x00FFFFFF, "IANA", "")
            .add_range(0x01000000, 0xFFFFFFFF, "浙江省杭州市", "电信");
        let bytes = builder.build();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let db = Database::from_path(file.path()).unwrap();
        let pair = db.find_ip("8.8.8.8").unwrap();
        assert_eq!(pair.main_info, "浙江省杭州市");
        assert_eq!(pair.sub_info, "电信");
    }

    #[test]
    fn test_shared_across_threads() {
        let db = std::sync::Arc::new(sample_db());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let db = db.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    let pair = db.find_ip("1.2.3.4").unwrap();
                    assert_eq!(pair.main_info, "广东省广州市");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
