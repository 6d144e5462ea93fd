use crate::error::FetchError;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Largest entry body read into memory
pub const MAX_ENTRY_BYTES: u64 = 32 * 1024 * 1024;

/// Zip export of a translation project, held in memory
pub struct TranslationArchive {
    inner: ZipArchive<Cursor<Vec<u8>>>,
}

impl TranslationArchive {
    /// Open an archive from downloaded bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FetchError> {
        let inner = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { inner })
    }

    /// Read an entry as UTF-8 text.
    ///
    /// The size recorded in the entry header is not trusted: the buffer grows
    /// with the bytes actually decompressed, up to `MAX_ENTRY_BYTES`.
    pub fn read_text(&mut self, name: &str) -> Result<String, FetchError> {
        let entry = self.inner.by_name(name)?;
        let mut bytes = Vec::new();
        entry
            .take(MAX_ENTRY_BYTES + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| FetchError::Io {
                action: "failed to read archive entry",
                path: name.into(),
                source: e,
            })?;

        if bytes.len() as u64 > MAX_ENTRY_BYTES {
            return Err(FetchError::EntryTooLarge {
                name: name.to_string(),
                limit: MAX_ENTRY_BYTES,
            });
        }

        String::from_utf8(bytes).map_err(|_| FetchError::EntryEncoding {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(content).expect("write entry");
        }
        writer.finish().expect("finish zip").into_inner()
    }

    /// Single empty stored entry whose central directory record claims an
    /// uncompressed size of `claimed_size` through a zip64 extra field.
    fn build_zip_with_claimed_size(name: &str, claimed_size: u64) -> Vec<u8> {
        let name = name.as_bytes();
        let mut out = Vec::new();

        // Local file header, real sizes (0)
        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // flags
        out.extend_from_slice(&0u16.to_le_bytes()); // stored
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0x21u16.to_le_bytes()); // mod date
        out.extend_from_slice(&0u32.to_le_bytes()); // crc32 of empty data
        out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
        out.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // extra length
        out.extend_from_slice(name);

        let central_offset = out.len() as u32;

        // Central directory header, uncompressed size deferred to zip64 extra
        out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes()); // version made by
        out.extend_from_slice(&45u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // flags
        out.extend_from_slice(&0u16.to_le_bytes()); // stored
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0x21u16.to_le_bytes()); // mod date
        out.extend_from_slice(&0u32.to_le_bytes()); // crc32
        out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
        out.extend_from_slice(&u32::MAX.to_le_bytes()); // uncompressed size → zip64
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&12u16.to_le_bytes()); // extra length
        out.extend_from_slice(&0u16.to_le_bytes()); // comment length
        out.extend_from_slice(&0u16.to_le_bytes()); // disk number
        out.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
        out.extend_from_slice(&0u32.to_le_bytes()); // external attributes
        out.extend_from_slice(&0u32.to_le_bytes()); // local header offset
        out.extend_from_slice(name);
        out.extend_from_slice(&0x0001u16.to_le_bytes()); // zip64 extra id
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(&claimed_size.to_le_bytes());

        let central_size = out.len() as u32 - central_offset;

        // End of central directory
        out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&central_size.to_le_bytes());
        out.extend_from_slice(&central_offset.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out
    }

    #[test]
    fn test_read_text_entry() {
        let bytes = build_zip(&[("vi/alice.php", "$lang[\"a\"] = \"Chào\";\n".as_bytes())]);
        let mut archive = TranslationArchive::from_bytes(bytes).expect("Should open");

        let text = archive.read_text("vi/alice.php").expect("Should read");
        assert_eq!(text, "$lang[\"a\"] = \"Chào\";\n");
    }

    #[test]
    fn test_missing_entry_is_archive_error() {
        let bytes = build_zip(&[("vi/alice.php", b"")]);
        let mut archive = TranslationArchive::from_bytes(bytes).expect("Should open");

        let err = archive.read_text("th/alice.php").unwrap_err();
        assert!(matches!(err, FetchError::Archive(_)));
    }

    #[test]
    fn test_non_utf8_entry() {
        let bytes = build_zip(&[("vi/alice.php", &[0xff, 0xfe, 0x00, 0xc3])]);
        let mut archive = TranslationArchive::from_bytes(bytes).expect("Should open");

        let err = archive.read_text("vi/alice.php").unwrap_err();
        assert!(matches!(err, FetchError::EntryEncoding { .. }));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = TranslationArchive::from_bytes(b"this is not a zip file".to_vec());
        assert!(matches!(result, Err(FetchError::Archive(_))));
    }

    #[test]
    fn test_inflated_header_size_does_not_allocate() {
        let bytes = build_zip_with_claimed_size("vi/alice.php", 1 << 42);

        // Either the archive is refused up front or reading returns normally;
        // no buffer of the claimed size is ever requested.
        let Ok(mut archive) = TranslationArchive::from_bytes(bytes) else {
            return;
        };
        match archive.read_text("vi/alice.php") {
            Ok(text) => assert!(text.is_empty()),
            Err(err) => assert!(matches!(
                err,
                FetchError::Archive(_) | FetchError::EntryEncoding { .. } | FetchError::Io { .. }
            )),
        }
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("vi/alice.php", stored).expect("start entry");
        writer
            .write_all(&vec![b'a'; MAX_ENTRY_BYTES as usize + 1])
            .expect("write entry");
        let bytes = writer.finish().expect("finish zip").into_inner();
        let mut archive = TranslationArchive::from_bytes(bytes).expect("Should open");

        let err = archive.read_text("vi/alice.php").unwrap_err();
        assert!(matches!(err, FetchError::EntryTooLarge { .. }));
    }
}
