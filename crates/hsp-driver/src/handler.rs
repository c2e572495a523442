use hsp_types::{KeyCode, Point, ScreenSize, SignalRecord};

/// Receiver for decoded records, one method per record kind.
///
/// Every method defaults to doing nothing, so a handler only overrides
/// the kinds it cares about. [`dispatch`] routes a record to the
/// matching method.
///
/// ```text
/// SignalRecord ──▶ dispatch() ──▶ on_hook_installed(screen)
///                              ├─▶ on_mouse_moved(point)
///                              ├─▶ on_mouse_clicked(point)
///                              ├─▶ on_key_pressed(key)
///                              ├─▶ on_window_title(title)
///                              └─▶ on_window_created(ok)
/// ```
pub trait SignalHandler {
    /// Startup outcome of the hook's message window.
    fn on_window_created(&mut self, _succeeded: bool) {}

    fn on_hook_installed(&mut self, _screen: ScreenSize) {}

    fn on_mouse_moved(&mut self, _point: Point) {}

    fn on_mouse_clicked(&mut self, _point: Point) {}

    fn on_key_pressed(&mut self, _key: KeyCode) {}

    fn on_window_title(&mut self, _title: &str) {}
}

/// Route `record` to the handler method for its kind.
pub fn dispatch<H: SignalHandler + ?Sized>(handler: &mut H, record: &SignalRecord) {
    match record {
        SignalRecord::WindowCreationFailed => handler.on_window_created(false),
        SignalRecord::WindowCreationSucceeded => handler.on_window_created(true),
        SignalRecord::HookInstalled(screen) => handler.on_hook_installed(*screen),
        SignalRecord::MouseMoved(point) => handler.on_mouse_moved(*point),
        SignalRecord::MouseClicked(point) => handler.on_mouse_clicked(*point),
        SignalRecord::KeyPressed(key) => handler.on_key_pressed(*key),
        SignalRecord::WindowTitleChanged(title) => handler.on_window_title(title),
    }
}
