//! Backend icon names to UI icon components

pub const DEFAULT_ICON_COMPONENT: &str = "Document";

pub fn icon_component(icon_name: &str) -> &'static str {
    match icon_name {
        "system" => "Setting",
        "user" => "User",
        "peoples" => "UserFilled",
        "tree-table" => "Grid",
        "dict" => "Collection",
        "monitor" => "Monitor",
        "tool" => "Tools",
        "guide" => "Guide",
        "star" => "Star",
        "chart" => "TrendCharts",
        "form" => "Document",
        "list" => "List",
        "tree" => "Share",
        "post" => "Postcard",
        "edit" => "Edit",
        "message" => "Message",
        "log" => "Document",
        "upload" => "Upload",
        "international" => "Globe",
        "online" => "Connection",
        "redis" => "Coin",
        "dashboard" => "Odometer",
        "job" => "Timer",
        "code" => "DocumentCopy",
        "logininfor" => "Key",
        _ => DEFAULT_ICON_COMPONENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_icons() {
        assert_eq!(icon_component("system"), "Setting");
        assert_eq!(icon_component("peoples"), "UserFilled");
        assert_eq!(icon_component("tenant"), DEFAULT_ICON_COMPONENT);
        assert_eq!(icon_component(""), DEFAULT_ICON_COMPONENT);
    }
}
