// Reading rosters from CSV and plain text files.

use crate::app::{io_common::simplify_file_name, *};

/// Adds the names of a CSV file, one per line, first column only.
///
/// The encoding is detected by the core (UTF-8 or Big5). An unreadable file
/// leaves the roster unchanged.
pub fn read_csv_roster(path: &str, roster: &mut Roster) -> AppResult<usize> {
    let bytes = fs::read(path).context(OpeningFileSnafu { path })?;
    debug!("read_csv_roster: {:?}: {} bytes", path, bytes.len());
    let added = roster.ingest_bytes(&bytes).context(CoreSnafu {})?;
    info!(
        "Read {} names from {}",
        added,
        simplify_file_name(path)
    );
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &[u8]) -> String {
        let p = std::env::temp_dir().join(format!("luckydraw-{}-{}", std::process::id(), name));
        fs::write(&p, content).unwrap();
        p.display().to_string()
    }

    #[test]
    fn utf8_file() {
        let path = write_temp("utf8.csv", "姓名,部門\n王小明,業務\n李大華,人資\n".as_bytes());
        let mut roster = Roster::new();
        assert_eq!(read_csv_roster(&path, &mut roster).unwrap(), 3);
        assert_eq!(roster.participants()[0].name, "姓名");
        assert_eq!(roster.participants()[2].name, "李大華");
    }

    #[test]
    fn undecodable_file() {
        let path = write_temp("bad.csv", &[0x80, 0xFF, 0x80]);
        let mut roster = Roster::new();
        let res = read_csv_roster(&path, &mut roster);
        assert!(matches!(
            res,
            Err(AppError::Core {
                source: DrawError::EncodingUnrecognized
            })
        ));
        assert!(roster.is_empty());
    }

    #[test]
    fn missing_file() {
        let mut roster = Roster::new();
        assert!(matches!(
            read_csv_roster("/nonexistent/staff.csv", &mut roster),
            Err(AppError::OpeningFile { .. })
        ));
    }
}
