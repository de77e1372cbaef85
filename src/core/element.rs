//! Render tree
//!
//! An [`Element`] pairs ratatui drawing with the input handlers that turn
//! terminal events into messages. Drawing does not depend on the message
//! type, so mapping an element only touches its handlers.

use std::fmt;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;

type Draw = Rc<dyn Fn(&mut Frame, Rect)>;
type Handler<Msg> = Rc<dyn Fn(&Event) -> Option<Msg>>;

enum Arrangement {
    Leaf,
    Split(Direction, Vec<Constraint>),
    Layered,
}

/// A node of the render tree
pub struct Element<Msg> {
    draw: Option<Draw>,
    handlers: Vec<Handler<Msg>>,
    arrangement: Arrangement,
    children: Vec<Element<Msg>>,
}

impl<Msg: 'static> Element<Msg> {
    /// Render a widget into the whole area given to this element
    pub fn new<W>(widget: W) -> Self
    where
        W: Widget + Clone + 'static,
    {
        Self {
            draw: Some(Rc::new(move |frame: &mut Frame, area: Rect| {
                frame.render_widget(widget.clone(), area)
            })),
            ..Self::empty()
        }
    }

    /// An element that draws nothing and emits nothing
    pub fn empty() -> Self {
        Self {
            draw: None,
            handlers: Vec::new(),
            arrangement: Arrangement::Leaf,
            children: Vec::new(),
        }
    }

    /// Stack children top to bottom
    pub fn column(children: Vec<(Constraint, Element<Msg>)>) -> Self {
        Self::split(Direction::Vertical, children)
    }

    /// Place children left to right
    pub fn row(children: Vec<(Constraint, Element<Msg>)>) -> Self {
        Self::split(Direction::Horizontal, children)
    }

    /// Draw children over each other in order, all in the same area
    pub fn layered(children: Vec<Element<Msg>>) -> Self {
        Self {
            arrangement: Arrangement::Layered,
            children,
            ..Self::empty()
        }
    }

    fn split(direction: Direction, children: Vec<(Constraint, Element<Msg>)>) -> Self {
        let (constraints, children) = children.into_iter().unzip();
        Self {
            arrangement: Arrangement::Split(direction, constraints),
            children,
            ..Self::empty()
        }
    }

    /// Emit `msg` whenever `code` is pressed
    pub fn on_key(self, code: KeyCode, msg: Msg) -> Self
    where
        Msg: Clone,
    {
        self.on_event(move |event| match event {
            Event::Key(KeyEvent {
                code: pressed,
                kind: KeyEventKind::Press,
                ..
            }) if *pressed == code => Some(msg.clone()),
            _ => None,
        })
    }

    /// Attach an arbitrary input handler
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Event) -> Option<Msg> + 'static,
    {
        self.handlers.push(Rc::new(handler));
        self
    }

    /// Re-target every message emitted anywhere in this tree
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Element<B> {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<B: 'static>(self, f: Rc<dyn Fn(Msg) -> B>) -> Element<B> {
        let handlers = self
            .handlers
            .into_iter()
            .map(|handler| {
                let f = Rc::clone(&f);
                Rc::new(move |event: &Event| handler(event).map(|msg| f(msg))) as Handler<B>
            })
            .collect();
        let children = self
            .children
            .into_iter()
            .map(|child| child.map_rc(Rc::clone(&f)))
            .collect();
        Element {
            draw: self.draw,
            handlers,
            arrangement: self.arrangement,
            children,
        }
    }
}

impl<Msg> Element<Msg> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(draw) = &self.draw {
            draw(frame, area);
        }
        match &self.arrangement {
            Arrangement::Leaf | Arrangement::Layered => {
                for child in &self.children {
                    child.render(frame, area);
                }
            }
            Arrangement::Split(direction, constraints) => {
                let areas = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, area) in self.children.iter().zip(areas.iter()) {
                    child.render(frame, *area);
                }
            }
        }
    }

    /// Messages emitted for `event`, own handlers first, then children in order
    pub fn handle(&self, event: &Event) -> Vec<Msg> {
        let mut msgs: Vec<Msg> = self
            .handlers
            .iter()
            .filter_map(|handler| handler(event))
            .collect();
        for child in &self.children {
            msgs.extend(child.handle(event));
        }
        msgs
    }
}

impl<Msg> fmt::Debug for Element<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("draws", &self.draw.is_some())
            .field("handlers", &self.handlers.len())
            .field("children", &self.children)
            .finish()
    }
}
