// ============================================================================
// RETAINED MODE SCENE
// ============================================================================

use crate::corner_info::{CornerPosition, CornerText, TextAttributes};
use crate::dimensions::{Coordinate, RectCoordinates};

/// What the rendering layer should draw. Nothing here paints; a renderer
/// walks [`Scene::commands`] and issues its own draw calls.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Text {
        coordinate: Coordinate,
        text: String,
        attributes: TextAttributes,
    },
    TouchFace {
        bar: usize,
        rect: RectCoordinates,
    },
}

impl From<CornerText> for DrawCommand {
    fn from(corner: CornerText) -> Self {
        Self::Text {
            coordinate: corner.coordinate,
            text: corner.text,
            attributes: corner.attributes,
        }
    }
}

/// Groups of commands that are replaced together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    CornerLabel(CornerPosition),
    CornerValue(CornerPosition),
    BarLabel(usize),
    TouchFace(usize),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<(Layer, DrawCommand)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, layer: Layer, command: DrawCommand) {
        self.commands.push((layer, command));
    }

    /// Removes everything previously drawn on `layer`.
    pub fn retire(&mut self, layer: Layer) {
        self.commands.retain(|(l, _)| *l != layer);
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().map(|(_, command)| command)
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, command)| command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
