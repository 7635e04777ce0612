// Writing groups to CSV files that spreadsheet tools open correctly.

use std::fs::File;

use crate::app::*;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes a header row then one `(group id, member name)` row per member.
pub fn write_groups_csv<W: Write>(groups: &[Group], mut writer: W) -> AppResult<()> {
    writer.write_all(UTF8_BOM).context(WritingOutputSnafu {})?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["group", "name"]).context(WritingCsvSnafu {})?;
    for group in groups.iter() {
        let gid = group.id.to_string();
        for member in group.members.iter() {
            wtr.write_record([gid.as_str(), member.name.as_str()])
                .context(WritingCsvSnafu {})?;
        }
    }
    wtr.flush().context(WritingOutputSnafu {})?;
    Ok(())
}

pub fn export_groups(path: &str, groups: &[Group]) -> AppResult<()> {
    info!("Exporting {} groups to {:?}", groups.len(), path);
    let file = File::create(path).context(OpeningFileSnafu { path })?;
    write_groups_csv(groups, file)
}
