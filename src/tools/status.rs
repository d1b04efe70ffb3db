//! Status Tool
//!
//! Runtime status of the netcarbs service, plus the usage guide handed to AI assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# Net Carbs Calculator Instructions

## The Formula

**Net carbs = Total carbs − Fiber − (0.5 × Polyols)**, never below 0 g.

- **Total carbs**: total carbohydrate grams from the label
- **Fiber**: dietary fiber grams
- **Polyols**: sugar alcohol grams (erythritol, xylitol, maltitol, ...)

Only half of the polyol grams are deducted. If fiber and polyols outweigh the
total, the result is 0 g, not a negative number.

Inputs are NOT validated. Pass label values as printed.

---

## Tools

| Tool | Use it for |
|------|------------|
| `calculate_net_carbs` | One-off calculation, nothing stored |
| `run_netcarbs_directive` | User typed `netcarbs <total> <fiber> <polyols>` |
| `log_calculation` | Calculate and keep a record (optional label) |
| `list_calculations` / `get_calculation` | Review the log, newest first |
| `delete_calculation` | Remove a mistaken entry |

### The `netcarbs` directive

```
netcarbs 30 5 10
```

Exactly four words separated by spaces. The reply reads:

```
Using your inputs: total=30.0g, fiber=5.0g, polyols=10.0g → net=20.0g.
```

The response also carries a `snack_prompt`. Answer it yourself: suggest a keto
snack that fits the computed net carbs.

---

## Keto Guidance

- Keep each meal at or below **20 g net carbs** (`keto_friendly` in every breakdown)
- Avoid sugar, grains, and starchy vegetables; prefer whole foods
- Keep answers short
"#;

/// Status response structure
#[derive(Debug, Serialize)]
pub struct NetCarbsStatus {
    /// Build information
    #[serde(flatten)]
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> NetCarbsStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NetCarbsStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("does/not/exist.db"));
        let status = tracker.get_status();

        assert_eq!(status.process_id, std::process::id());
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.build.version, crate::build_info::VERSION);
    }

    #[test]
    fn test_status_json_carries_build_info() {
        let status = StatusTracker::new(PathBuf::from("does/not/exist.db")).get_status();
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["name"], "netcarbs");
        assert_eq!(json["description"], crate::build_info::DESCRIPTION);
        assert_eq!(json["build_number"], crate::build_info::BUILD_NUMBER);
        assert!(json.get("build").is_none());
    }

    #[test]
    fn test_instructions_mention_every_tool() {
        for tool in [
            "calculate_net_carbs",
            "run_netcarbs_directive",
            "log_calculation",
            "list_calculations",
            "get_calculation",
            "delete_calculation",
        ] {
            assert!(USAGE_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
