//! IPv4/IPv6 address values: canonical 128-bit storage, scope classification,
//! tolerant comparison and prefix-length netmasks, plus the reporting used by
//! the `netaddr` binary.

pub mod config;
pub mod endian;
pub mod models;
pub mod output;
pub mod processing;

use config::{Args, Config};
use processing::{
    compare, find_equivalent_rows, process_input, process_record, read_address_file, AddressRow,
};
use std::error::Error;

/// Build report rows from the record file (if any) followed by the direct inputs.
pub fn collect_rows(args: &Args) -> Result<Vec<AddressRow>, Box<dyn Error>> {
    let mut rows = Vec::new();
    if let Some(file) = &args.file {
        let records = read_address_file(file)?;
        rows.extend(records.iter().map(process_record));
    }
    rows.extend(
        args.inputs
            .iter()
            .enumerate()
            .map(|(i, input)| process_input(i, input)),
    );
    Ok(rows)
}

/// Initialise `log4rs` from the YAML file at `path`.
pub fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    log4rs::init_file(path, Default::default())
        .map_err(|e| format!("Logging disabled, cannot load {path}: {e}").into())
}

/// Run the report described by `args` and write it to stdout.
pub fn run(args: &Args, config: &Config) -> Result<(), Box<dyn Error>> {
    if args.file.is_none() && args.inputs.is_empty() && args.compare.is_none() {
        return Err("Nothing to do: give addresses, --file PATH or --compare A B".into());
    }

    if let Some((left, right)) = args.compare_pair() {
        let row = compare(left, right, config.conversion);
        output::write_comparison(&row, config.output)?;
    }

    let rows = collect_rows(args)?;
    for (i, j) in find_equivalent_rows(&rows, config.conversion) {
        log::warn!(
            "{} ({}) and {} ({}) are the same address",
            rows[i].name,
            rows[i].address,
            rows[j].name,
            rows[j].address
        );
    }
    if !rows.is_empty() {
        output::write_rows(&rows, config.output)?;
    }

    Ok(())
}
