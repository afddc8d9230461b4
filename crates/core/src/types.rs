/// Serial (integer) primary key used by holdings, areas and append-only
/// record tables.
pub type DbId = i64;

/// UTC timestamp as stored in `timestamptz` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
