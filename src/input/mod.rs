//! Input event types
//!
//! Platform-independent pointer events consumed by the impact sources. With
//! the `window` feature enabled, winit window events convert directly.

/// Mouse button type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(feature = "window")]
impl MouseButton {
    /// Convert from a winit mouse button.
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Pointer input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Mouse button pressed at a screen position (pixels, origin top-left).
    MousePress {
        button: MouseButton,
        position: (f32, f32),
    },
    /// Mouse button released.
    MouseRelease {
        button: MouseButton,
        position: (f32, f32),
    },
    /// Cursor moved.
    MouseMotion { position: (f32, f32) },
    /// Window resized.
    Resize { width: u32, height: u32 },
}

#[cfg(feature = "window")]
impl Event {
    /// Convert from a winit window event.
    ///
    /// winit reports button presses without a position, so the caller passes
    /// the last cursor position it observed.
    pub fn from_winit(event: &winit::event::WindowEvent, cursor: (f32, f32)) -> Option<Self> {
        use winit::event::{ElementState, WindowEvent};

        match event {
            WindowEvent::CursorMoved { position, .. } => Some(Event::MouseMotion {
                position: (position.x as f32, position.y as f32),
            }),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from_winit(*button)?;
                Some(match state {
                    ElementState::Pressed => Event::MousePress {
                        button,
                        position: cursor,
                    },
                    ElementState::Released => Event::MouseRelease {
                        button,
                        position: cursor,
                    },
                })
            }
            WindowEvent::Resized(size) => Some(Event::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}
