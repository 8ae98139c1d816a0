/*
 * Input Module
 *
 * This module translates window events into the small set of events the
 * simulation cares about and decides whether the frame loop keeps running.
 * Closing the window or pressing Escape ends the loop; nothing is saved.
 */

use nannou::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyPressed(Key),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

// Drain a batch of events; the first quit or escape wins
pub fn handle_events<I>(events: I) -> LoopControl
where
    I: IntoIterator<Item = InputEvent>,
{
    for event in events {
        match event {
            InputEvent::Quit | InputEvent::KeyPressed(Key::Escape) => return LoopControl::Exit,
            InputEvent::KeyPressed(_) | InputEvent::Other => {}
        }
    }
    LoopControl::Continue
}

// Map a nannou window event onto an InputEvent
pub fn from_window_event(event: &WindowEvent) -> InputEvent {
    match event {
        WindowEvent::Closed => InputEvent::Quit,
        WindowEvent::KeyPressed(key) => InputEvent::KeyPressed(*key),
        _ => InputEvent::Other,
    }
}
