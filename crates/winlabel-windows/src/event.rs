use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_NAMECHANGE, EVENT_SYSTEM_FOREGROUND, EVENT_SYSTEM_MOVESIZEEND,
};
use winlabel_core::WindowEvent;

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or menu item.
const OBJID_WINDOW: i32 = 0;

/// Translates a raw WinEvent into a `WindowEvent`.
///
/// Returns `None` for child object events and for event types the
/// widget does not react to.
pub fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<WindowEvent> {
    if id_object != OBJID_WINDOW || hwnd.is_invalid() {
        return None;
    }

    let hwnd = hwnd.0 as usize;

    match event {
        e if e == EVENT_SYSTEM_FOREGROUND => Some(WindowEvent::Focused { hwnd }),
        e if e == EVENT_OBJECT_NAMECHANGE => Some(WindowEvent::TitleChanged { hwnd }),
        e if e == EVENT_SYSTEM_MOVESIZEEND => Some(WindowEvent::Moved { hwnd }),
        _ => None,
    }
}
