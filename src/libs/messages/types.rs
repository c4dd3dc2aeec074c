#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    AuthSuccess,
    AuthFailed(String), // error

    // === CONFIGURATION MESSAGES ===
    ConfigLoadFailed(String), // error
    NoInputFile,
    Usage,

    // === SYNC MESSAGES ===
    InvalidLine(String),                   // raw line
    TaskAlreadyCreated(String),            // subject
    TaskCreateFailed(String, String),      // subject, error
    CustomFieldsUpdateFailed(i64, String), // task id, error
    DedupReadFailed(String, String),       // subject, error
    DedupRecordFailed(String, String),     // subject, error
    TaskSynced(String),                    // subject
    SyncSummary {
        created: usize,
        skipped: usize,
        failed: usize,
        invalid: usize,
    },
    SyncCompleted,

    // === REPORT MESSAGES ===
    ReportLogOpenFailed(String), // error
    ReportNoEntries(String),     // log path
    ReportGenerated(String),     // output path
    ReportFailed(String),        // error

    // === JOURNAL MESSAGES ===
    ErrorLogOpenFailed(String), // error
}
