//! Test helpers for writing request files and reading reports back.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Depot plus two unit-demand stops on one van of capacity 3.
pub(super) fn two_stop_request() -> Value {
    json!({
        "stops": [
            { "name": "Depot", "location": { "x": 0.0, "y": 0.0 } },
            { "name": "Bakery", "location": { "x": 1.0, "y": 0.0 }, "service_minutes": 0 },
            { "name": "Florist", "location": { "x": 1.2, "y": 0.8 }, "service_minutes": 0 }
        ],
        "vehicles": [{ "name": "Van 1", "capacity": 3 }],
        "durations_min": [[0, 10, 12], [10, 0, 8], [12, 8, 0]],
        "distances_m": [[0, 1000, 1200], [1000, 0, 800], [1200, 800, 0]]
    })
}

/// Three stops demanding ten units against a van of capacity 5.
pub(super) fn overloaded_request() -> Value {
    json!({
        "stops": [
            { "location": { "x": 0.0, "y": 0.0 } },
            { "location": { "x": 1.0, "y": 0.0 }, "demand": 3 },
            { "location": { "x": 2.0, "y": 0.0 }, "demand": 3 },
            { "location": { "x": 3.0, "y": 0.0 }, "demand": 4 }
        ],
        "vehicles": [{ "capacity": 5 }],
        "durations_min": [[0, 5, 5, 5], [5, 0, 5, 5], [5, 5, 0, 5], [5, 5, 5, 0]],
        "distances_m": [[0, 1, 1, 1], [1, 0, 1, 1], [1, 1, 0, 1], [1, 1, 1, 0]]
    })
}

/// Serialise `request` into `path`.
pub(super) fn write_request(path: &Utf8Path, request: &Value) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Parse a report written by the solve command.
pub(super) fn parse_report(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("report should be JSON")
}
