//! The active window widget: ties resolution, filtering, icons and
//! label rendering to a drawable surface.
//!
//! All methods run on one thread in event order. Nothing here blocks on
//! anything but the synchronous OS queries behind the resolver traits.

use image::RgbaImage;

use crate::config::{Config, WidgetConfig};
use crate::display::DisplayState;
use crate::event::{MouseButton, WindowEvent};
use crate::filter::{IgnoreRules, Visibility, should_display};
use crate::icon::{Icon, IconResolver, IconSource};
use crate::window::InfoResolver;

/// Where the widget draws itself.
pub trait WidgetSurface {
    fn show(&mut self);
    fn hide(&mut self);
    fn set_text(&mut self, text: &str);
    /// Shows `icon`, or removes the icon element entirely for `None`.
    fn set_icon(&mut self, icon: Option<&RgbaImage>);
}

/// Named actions that mouse buttons can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleLabel,
    DoNothing,
}

impl Action {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "toggle_label" => Some(Self::ToggleLabel),
            "do_nothing" => Some(Self::DoNothing),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ToggleLabel => "toggle_label",
            Self::DoNothing => "do_nothing",
        }
    }
}

/// Displays the title and icon of the focused window.
pub struct ActiveWindowWidget<R, S, W> {
    config: WidgetConfig,
    rules: IgnoreRules,
    /// Handle of the monitor the widget is placed on.
    monitor: usize,
    resolver: R,
    /// `None` when icons are disabled.
    icons: Option<IconResolver<S>>,
    surface: W,
    state: DisplayState,
    icon: Option<Icon>,
}

impl<R, S, W> ActiveWindowWidget<R, S, W>
where
    R: InfoResolver,
    S: IconSource,
    W: WidgetSurface,
{
    /// Creates the widget and shows the "no window" label.
    pub fn new(config: &Config, monitor: usize, resolver: R, icon_source: S, mut surface: W) -> Self {
        let icons = config
            .icon
            .enabled
            .then(|| IconResolver::new(icon_source, config.icon.cache_capacity));

        surface.set_text(&config.widget.label_no_window);
        surface.set_icon(None);

        Self {
            rules: config.widget.ignore_rules(),
            config: config.widget.clone(),
            monitor,
            resolver,
            icons,
            surface,
            state: DisplayState::default(),
            icon: None,
        }
    }

    /// Dispatches one event.
    pub fn handle(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Focused { hwnd } | WindowEvent::Moved { hwnd } => {
                self.on_focus_changed(hwnd);
            }
            WindowEvent::TitleChanged { hwnd } => {
                self.on_name_changed(hwnd);
            }
            WindowEvent::Clicked { button } => self.on_click(button),
        }
    }

    /// Re-evaluates the widget for a newly focused window.
    ///
    /// Only a [`Visibility::Visible`] outcome touches stored state or
    /// resolves an icon.
    pub fn on_focus_changed(&mut self, hwnd: usize) -> Visibility {
        let info = match self.resolver.resolve(hwnd) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("{e}");
                None
            }
        };

        let visibility = should_display(
            info.as_ref(),
            &self.rules,
            self.config.monitor_exclusive,
            self.monitor,
        );
        tracing::trace!("0x{hwnd:X} -> {visibility:?}");

        match visibility {
            Visibility::Hidden => self.surface.hide(),
            Visibility::Suppressed => self.surface.show(),
            Visibility::Visible => {
                self.surface.show();
                self.icon = self.icons.as_mut().and_then(|i| i.resolve_icon(hwnd));
                self.state.last = info;
                self.render();
            }
        }
        visibility
    }

    /// Refreshes the label when the displayed window's title changes.
    ///
    /// Title changes of any other window are ignored.
    pub fn on_name_changed(&mut self, hwnd: usize) -> Option<Visibility> {
        let tracked = self.state.last.as_ref().is_some_and(|last| last.hwnd == hwnd);
        tracked.then(|| self.on_focus_changed(hwnd))
    }

    /// Runs the action bound to `button`.
    pub fn on_click(&mut self, button: MouseButton) {
        let callbacks = &self.config.callbacks;
        let name = match button {
            MouseButton::Left => &callbacks.on_left,
            MouseButton::Middle => &callbacks.on_middle,
            MouseButton::Right => &callbacks.on_right,
        };
        let action = Action::from_name(name).ok_or_else(|| name.clone());
        match action {
            Ok(Action::ToggleLabel) => self.toggle_label(),
            Ok(Action::DoNothing) => {}
            Err(name) => tracing::warn!("unknown action {name:?} for {button:?}"),
        }
    }

    /// Switches between the primary and alternate label and re-renders
    /// from the stored window without resolving anything.
    pub fn toggle_label(&mut self) {
        self.state.toggle();
        self.render();
    }

    fn render(&mut self) {
        let text = self.state.render(&self.config);
        self.surface.set_text(&text);
        self.surface.set_icon(self.icon.as_deref());
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn surface(&self) -> &W {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut W {
        &mut self.surface
    }

    pub fn icons(&self) -> Option<&IconResolver<S>> {
        self.icons.as_ref()
    }
}
