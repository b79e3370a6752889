use fleet_console::domain::entities::unit::UnitStatus;

pub fn table_container_style() -> &'static str {
    "width: 100%; background: #fff; padding: 16px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.08); box-sizing: border-box;"
}

pub fn table_header_cell_style() -> &'static str {
    "border-bottom: 1px solid #ddd; padding: 8px; text-align: left; background: #fafafa; white-space: nowrap;"
}

pub fn table_cell_style() -> &'static str {
    "border-bottom: 1px solid #eee; padding: 8px;"
}

pub fn button_style(active: bool) -> &'static str {
    if active {
        "border: 1px solid #23aef2; background: #23aef2; color: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
    } else {
        "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
    }
}

pub fn status_badge_style(status: UnitStatus) -> &'static str {
    match status {
        UnitStatus::Enabled => {
            "display: inline-block; padding: 2px 8px; border-radius: 999px; background: #111; color: #fff; font-size: 12px;"
        }
        UnitStatus::Disabled => {
            "display: inline-block; padding: 2px 8px; border-radius: 999px; background: #eee; color: #333; font-size: 12px;"
        }
    }
}
