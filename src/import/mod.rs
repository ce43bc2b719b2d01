mod columns;
mod csv_import;

pub(crate) use csv_import::CsvImporter;
