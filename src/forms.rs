//! Client-side form rules shared by SSR markup and the browser client.

/// Element ids of the vManage setup form
pub const SAVE_BUTTON_ID: &str = "vmanage-save";
pub const PORT_INPUT_ID: &str = "vmanage-port";

/// Whether a typed port value may replace the current one: empty, or ASCII digits only
pub fn accept_port_input(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Parse a complete port value
pub fn parse_port(value: &str) -> Option<u16> {
    if value.is_empty() || !accept_port_input(value) {
        return None;
    }
    value.parse::<u16>().ok().filter(|p| *p != 0)
}
