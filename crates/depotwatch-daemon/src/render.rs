use depotwatch_core::{service_title, status_phrase, ChangeListUpdate, Counter, DepotChange, StatusChange};
use depotwatch_notify::{Notification, Severity};

pub fn changelist_notification(update: &ChangeListUpdate, audience: Option<&str>) -> Notification {
    Notification {
        title: "Change Number".to_string(),
        body: format!("{} -> {}", update.from, update.to),
        severity: Severity::Update,
        audience: audience.map(str::to_string),
    }
}

pub fn depot_notification(
    latest: &Counter,
    changes: &[DepotChange],
    audience: Option<&str>,
) -> Notification {
    let mut body = format!("Changelist {}\nChanged:", latest);
    for c in changes {
        body.push_str(&format!("\n{}/{} -> {}", c.depot, c.manifest, c.update.gid));
    }
    Notification {
        title: "Depot Update".to_string(),
        body,
        severity: Severity::Update,
        audience: audience.map(str::to_string),
    }
}

pub fn status_notification(change: &StatusChange, audience: Option<&str>) -> Notification {
    let title = service_title(&change.service);
    Notification {
        title: title.to_string(),
        body: format!("The {} service is {}", title, status_phrase(&change.status)),
        severity: Severity::Alert,
        audience: audience.map(str::to_string),
    }
}
