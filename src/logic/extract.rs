// SPDX-License-Identifier: MIT

//! Value extraction for driver controls

use crate::panel::{ControlHandle, ControlKind, Panel};

const TRUE: &str = "true";
const FALSE: &str = "false";

fn flag(value: bool) -> String {
    let s = if value { TRUE } else { FALSE };
    s.to_string()
}

/// Read the comparable value of a driver control.
///
/// Checkboxes and media pickers report `"true"`/`"false"`. A radio group with
/// nothing checked, or a control whose input has no value, yields `None`.
pub fn extract_value<P: Panel + ?Sized>(
    panel: &P,
    control: &ControlHandle,
    kind: ControlKind,
) -> Option<String> {
    match kind {
        ControlKind::Checkbox => Some(flag(panel.is_checked(control))),
        ControlKind::MediaPicker => Some(flag(panel.has_thumbnail(control))),
        ControlKind::Select => panel.select_value(control),
        ControlKind::Textarea => panel.textarea_value(control),
        ControlKind::Radio => panel.checked_radio_value(control),
        ControlKind::Generic => panel.input_value(control),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Control, MemoryPanel};

    fn handle(id: &str) -> ControlHandle {
        ControlHandle::new(id)
    }

    #[test]
    fn test_checkbox_value() {
        let mut panel = MemoryPanel::new().with(Control::checkbox("sticky", false));
        assert_eq!(
            extract_value(&panel, &handle("sticky"), ControlKind::Checkbox),
            Some("false".to_string())
        );
        panel.set_checked("sticky", true);
        assert_eq!(
            extract_value(&panel, &handle("sticky"), ControlKind::Checkbox),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_media_picker_value() {
        let panel = MemoryPanel::new()
            .with(Control::image("logo", true))
            .with(Control::image("favicon", false));
        assert_eq!(
            extract_value(&panel, &handle("logo"), ControlKind::MediaPicker),
            Some("true".to_string())
        );
        assert_eq!(
            extract_value(&panel, &handle("favicon"), ControlKind::MediaPicker),
            Some("false".to_string())
        );
    }

    #[test]
    fn test_select_textarea_and_text_values() {
        let panel = MemoryPanel::new()
            .with(Control::select("layout", "boxed"))
            .with(Control::textarea("notice", "Closed today"))
            .with(Control::text("width", "1200"));
        assert_eq!(
            extract_value(&panel, &handle("layout"), ControlKind::Select),
            Some("boxed".to_string())
        );
        assert_eq!(
            extract_value(&panel, &handle("notice"), ControlKind::Textarea),
            Some("Closed today".to_string())
        );
        assert_eq!(
            extract_value(&panel, &handle("width"), ControlKind::Generic),
            Some("1200".to_string())
        );
    }

    #[test]
    fn test_radio_value() {
        let mut panel = MemoryPanel::new().with(Control::radio("align", &["left", "right"], None));
        assert_eq!(
            extract_value(&panel, &handle("align"), ControlKind::Radio),
            None
        );
        panel.choose("align", "right");
        assert_eq!(
            extract_value(&panel, &handle("align"), ControlKind::Radio),
            Some("right".to_string())
        );
    }

    #[test]
    fn test_missing_control() {
        let panel = MemoryPanel::new();
        assert_eq!(
            extract_value(&panel, &handle("gone"), ControlKind::Generic),
            None
        );
        assert_eq!(
            extract_value(&panel, &handle("gone"), ControlKind::Checkbox),
            Some("false".to_string())
        );
    }
}
