use anyhow::Result;
use tracing::info;

use crate::cli::ProfileArgs;
use crate::dataset::load_records;
use crate::profile::build_profile;
use crate::util::write_json_stdout;

pub fn run(args: ProfileArgs) -> Result<()> {
    let records = load_records(&args.records_path)?;
    let profile = build_profile(&records);

    info!(
        path = %args.records_path.display(),
        total_rows = profile.total_rows,
        record_types = profile.record_types.len(),
        "profiled records table"
    );

    for group in &profile.record_types {
        let blank = group
            .missing_cells
            .iter()
            .filter(|entry| entry.missing == group.rows)
            .map(|entry| entry.column.as_str())
            .collect::<Vec<&str>>();
        let partial = group
            .missing_cells
            .iter()
            .filter(|entry| entry.missing > 0 && entry.missing < group.rows)
            .map(|entry| format!("{}={}", entry.column, entry.missing))
            .collect::<Vec<String>>();

        info!(
            record_type = %group.record_type,
            rows = group.rows,
            fully_missing = %blank.join(","),
            partially_missing = %partial.join(","),
            "record type profile"
        );
    }

    if args.json {
        write_json_stdout(&profile)?;
    }

    Ok(())
}
