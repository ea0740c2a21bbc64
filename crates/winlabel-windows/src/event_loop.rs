//! WinEvent hook and message pump.
//!
//! Hook callbacks and window procedures run inside `GetMessageW` on the
//! thread that installed them. They push events into a thread-local
//! channel and post `WM_WAKE`, which makes the pump return to its caller
//! so the events can be handled outside the callback.

use std::cell::RefCell;
use std::sync::mpsc::Sender;
use std::thread;

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PostThreadMessageW, TranslateMessage, WINEVENT_OUTOFCONTEXT,
    WINEVENT_SKIPOWNPROCESS, WM_APP, WM_QUIT,
};
use winlabel_core::{Error, Result, WindowEvent};

use crate::event;

/// Minimum event code we listen for (EVENT_SYSTEM_FOREGROUND = 0x0003).
const EVENT_MIN: u32 = 0x0003;

/// Maximum event code we listen for (EVENT_OBJECT_NAMECHANGE = 0x800C).
const EVENT_MAX: u32 = 0x800C;

/// Thread message telling the pump that events are queued.
pub const WM_WAKE: u32 = WM_APP + 1;

struct Sink {
    tx: Sender<WindowEvent>,
    thread_id: u32,
}

thread_local! {
    static SINK: RefCell<Option<Sink>> = const { RefCell::new(None) };
}

/// Queues `event` for the pump running on the current thread.
///
/// Does nothing if no hook was installed on this thread.
pub(crate) fn emit(event: WindowEvent) {
    SINK.with(|cell| {
        if let Some(sink) = cell.borrow().as_ref()
            && sink.tx.send(event).is_ok()
        {
            unsafe {
                let _ = PostThreadMessageW(sink.thread_id, WM_WAKE, WPARAM(0), LPARAM(0));
            }
        }
    });
}

/// An installed WinEvent hook. Unhooks on drop.
pub struct Hook {
    hook: HWINEVENTHOOK,
}

impl Hook {
    /// Installs the hook on the current thread. Events are sent to `tx`.
    pub fn install(tx: Sender<WindowEvent>) -> Result<Self> {
        let thread_id = unsafe { GetCurrentThreadId() };
        SINK.with(|cell| *cell.borrow_mut() = Some(Sink { tx, thread_id }));

        // SAFETY: WINEVENT_OUTOFCONTEXT means the callback runs in our
        // process on this thread. WINEVENT_SKIPOWNPROCESS ignores the
        // widget's own window.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_MIN,
                EVENT_MAX,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };

        if hook.is_invalid() {
            SINK.with(|cell| cell.borrow_mut().take());
            return Err(Error::Platform("failed to set WinEvent hook".into()));
        }

        tracing::debug!("WinEvent hook installed on thread {thread_id}");
        Ok(Self { hook })
    }
}

impl Drop for Hook {
    fn drop(&mut self) {
        unsafe {
            let _ = UnhookWinEvent(self.hook);
        }
        SINK.with(|cell| cell.borrow_mut().take());
    }
}

/// Runs the message pump until `WM_QUIT`, calling `on_wake` each time
/// events were queued.
pub fn run_message_pump(mut on_wake: impl FnMut()) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if msg.hwnd.is_invalid() && msg.message == WM_WAKE {
            on_wake();
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Starts a hook on a background thread that forwards events to `tx`.
pub fn start(tx: Sender<WindowEvent>) -> Result<EventLoopHandle> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<u32>>();

    let handle = thread::spawn(move || {
        let hook = match Hook::install(tx) {
            Ok(hook) => hook,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        let _ = ready_tx.send(Ok(unsafe { GetCurrentThreadId() }));

        // Events go straight to the receiver, so waking is a no-op here.
        run_message_pump(|| {});
        drop(hook);
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| Error::Platform("event loop thread exited unexpectedly".into()))??;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle to a background event loop started by [`start`].
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Id of the thread running the loop.
    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if let Some(window_event) = event::translate(event, hwnd, id_object) {
        emit(window_event);
    }
}
