//! Interfacer is a grid-based UI engine core.
//!
//! It takes an already-parsed interface description (grid shape, named styles, components) and
//! turns it into a live [`ComponentTree`]:
//!
//! 1. **Layout**: each component's `grid_cell` becomes a pixel [`GridRect`], optionally resized
//!    and centred inside its cell.
//! 2. **Style**: referenced named styles and inline properties merge into one [`ResolvedStyle`].
//! 3. **Construct**: the `type` picks a widget; widgets are drawable, and may be focusable or
//!    animatable.
//! 4. **Run**: the host drives [`ComponentTree::tick`] and [`ComponentTree::handle_event`] and
//!    paints the [`DrawList`] from [`ComponentTree::draw`]. Bindings registered on the tree
//!    ([`ComponentTree::bind`], [`ComponentTree::when`]) run at the end of every tick.
//!
//! Pixels come from an [`AssetLoader`] supplied by the host; the engine never touches the
//! filesystem or a display. Component-level problems never fail the build: they are returned as
//! [`Diagnostic`]s next to the tree.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod binding;
mod component;
mod foundation;
mod interaction;
mod layout;
mod scene;
mod style;
mod tree;

pub use animation::frames::{FrameCache, FramePoll, apply_colorkey};
pub use animation::spritesheet::{SpriteGeometry, slice_spritesheet};
pub use animation::state::{AnimationState, FrameSource};
pub use assets::decode::decode_image;
pub use assets::store::{AssetLoader, AssetPoll, FrameImage, MemoryAssetLoader};
pub use binding::{Attr, AttrValue, BindingId};
pub use component::draw::{DrawList, DrawOp, FontSpec, TextAlign};
pub use component::factory::{Construction, build_component};
pub use component::kind::ComponentKind;
pub use component::node::{ComponentNode, Widget};
pub use component::widgets::{
    AnimationWidget, ButtonFace, ButtonWidget, ImageSlot, ImageWidget, InputWidget,
    ParagraphWidget, TextWidget,
};
pub use component::{
    Animatable, DrawContext, Drawable, Focusable, Interaction, InteractionKind,
};
pub use foundation::color::{ColorValue, Rgba8};
pub use foundation::core::{Extent, GridRect, Point};
pub use foundation::error::{Diagnostic, DiagnosticKind, InterfacerError, InterfacerResult};
pub use interaction::focus::{FocusState, InputEvent, Key, Stimulus, Transition};
pub use interaction::variant::StyleVariant;
pub use layout::grid::{CellAddress, GridLayout};
pub use scene::model::{ComponentDesc, Dimension, DimensionSpec, InterfaceDesc, NamedStyle, PropertyMap};
pub use style::{ResolvedStyle, StyleResolution, StyleTable};
pub use tree::{BuiltTree, ComponentTree};
