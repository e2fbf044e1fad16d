use std::collections::HashMap;

use crate::{
    animation::frames::FrameCache,
    assets::store::AssetLoader,
    binding::{Attr, AttrValue, Binding, BindingId, BindingSet},
    component::{
        Interaction,
        draw::{DrawList, DrawOp},
        factory::build_component,
        kind::ComponentKind,
        node::ComponentNode,
        widgets::ImageSlot,
    },
    foundation::{
        color::ColorValue,
        core::{Extent, Point},
        error::{Diagnostic, InterfacerResult},
    },
    interaction::focus::InputEvent,
    layout::grid::GridLayout,
    scene::model::InterfaceDesc,
    style::StyleTable,
};

/// A constructed tree plus everything that went wrong for individual components.
#[derive(Debug)]
pub struct BuiltTree {
    pub tree: ComponentTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Live component tree for one interface on one display extent.
///
/// Nodes keep declaration order, which is also draw order and event order.
#[derive(Debug)]
pub struct ComponentTree {
    name: String,
    background: ColorValue,
    background_image: Option<ImageSlot>,
    grid: GridLayout,
    nodes: Vec<ComponentNode>,
    ids: HashMap<String, usize>,
    frames: FrameCache,
    bindings: BindingSet,
}

/// Label used in diagnostics about the interface background.
const BACKGROUND_LABEL: &str = "background";

impl ComponentTree {
    /// Lay out, style and construct every component, then make a first pass over the loader.
    ///
    /// Only a grid with no usable cells is an error; component-level problems come back as
    /// diagnostics and the affected component is dropped or degraded.
    #[tracing::instrument(skip(desc, loader), fields(name = %desc.name, components = desc.components.len()))]
    pub fn build(
        desc: &InterfaceDesc,
        extent: Extent,
        loader: &dyn AssetLoader,
    ) -> InterfacerResult<BuiltTree> {
        let grid = GridLayout::new(desc.rows, desc.columns, extent)?;
        let styles = StyleTable::new(&desc.styles);

        let mut nodes: Vec<ComponentNode> = Vec::with_capacity(desc.components.len());
        let mut ids = HashMap::new();
        let mut diagnostics = Vec::new();
        for (index, component) in desc.components.iter().enumerate() {
            let built = build_component(index, component, &grid, &styles);
            diagnostics.extend(built.diagnostics);
            let Some(node) = built.node else {
                continue;
            };
            if let Some(id) = node.id()
                && ids.insert(id.to_owned(), nodes.len()).is_some()
            {
                tracing::warn!(id, "duplicate component id, lookups return the later one");
            }
            nodes.push(node);
        }

        let mut tree = Self {
            name: desc.name.clone(),
            background: desc.background.clone(),
            background_image: desc
                .background_image
                .as_deref()
                .map(|key| ImageSlot::new(key, None)),
            grid,
            nodes,
            ids,
            frames: FrameCache::new(),
            bindings: BindingSet::default(),
        };
        diagnostics.extend(tree.poll_assets(loader));
        for d in &diagnostics {
            tracing::warn!(component = %d.component, "{}", d.kind);
        }
        tracing::debug!(
            nodes = tree.nodes.len(),
            diagnostics = diagnostics.len(),
            "component tree built"
        );
        Ok(BuiltTree { tree, diagnostics })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> &ColorValue {
        &self.background
    }

    pub fn background_image(&self) -> Option<&ImageSlot> {
        self.background_image.as_ref()
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn nodes(&self) -> &[ComponentNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ComponentNode> {
        self.ids.get(id).map(|&i| &self.nodes[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        let i = *self.ids.get(id)?;
        self.nodes.get_mut(i)
    }

    /// Topmost component under `p`, the last declared one when several overlap.
    pub fn component_at(&self, p: Point) -> Option<&ComponentNode> {
        let cell = self.grid.cell_at(p)?;
        self.nodes
            .iter()
            .rev()
            .find(|n| n.cell() == cell && n.rect().contains(p))
    }

    /// Every component of one type, in declaration order.
    pub fn of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &ComponentNode> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    pub fn frame_cache(&self) -> &FrameCache {
        &self.frames
    }

    /// Copy `from`'s attribute into `to`'s on every tick, converted to the target's shape.
    pub fn bind(&mut self, from: (&str, Attr), to: (&str, Attr)) -> BindingId {
        self.bindings.insert(Binding::Mirror {
            from: (from.0.to_owned(), from.1),
            to: (to.0.to_owned(), to.1),
        })
    }

    /// Replace an attribute with `callback(current value)` on every tick.
    pub fn bind_with(
        &mut self,
        target: (&str, Attr),
        callback: impl FnMut(AttrValue) -> AttrValue + 'static,
    ) -> BindingId {
        self.bindings.insert(Binding::Callback {
            target: (target.0.to_owned(), target.1),
            callback: Box::new(callback),
        })
    }

    /// Run `action` on the tick where `condition` first holds. With `keep`, run it on every
    /// tick where it holds.
    pub fn when(
        &mut self,
        condition: impl FnMut(&ComponentTree) -> bool + 'static,
        action: impl FnMut(&mut ComponentTree) + 'static,
        keep: bool,
    ) -> BindingId {
        self.bindings.insert(Binding::Condition {
            condition: Box::new(condition),
            action: Box::new(action),
            keep,
        })
    }

    /// Returns whether the binding was still registered.
    pub fn unbind(&mut self, id: BindingId) -> bool {
        self.bindings.remove(id)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Retry anything still waiting on the loader, advance every animation by `elapsed`, then
    /// evaluate bindings.
    ///
    /// Returns diagnostics first seen during this tick.
    pub fn tick(&mut self, elapsed: f64, loader: &dyn AssetLoader) -> Vec<Diagnostic> {
        let diagnostics = self.poll_assets(loader);
        for d in &diagnostics {
            tracing::warn!(component = %d.component, "{}", d.kind);
        }
        for node in &mut self.nodes {
            node.advance(elapsed);
        }
        self.run_bindings();
        diagnostics
    }

    fn run_bindings(&mut self) {
        let mut evaluated = self.bindings.take();
        evaluated.retain_mut(|(_, binding)| binding.run(self));
        self.bindings.restore(evaluated);
    }

    /// Deliver one input event to every focusable component, in declaration order.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<Interaction> {
        self.nodes
            .iter_mut()
            .flat_map(|node| node.handle_event(event))
            .collect()
    }

    /// Background first, then each component in declaration order. A loaded background image
    /// replaces the background colour.
    pub fn draw(&self) -> DrawList {
        let mut out = DrawList::new();
        let rect = self.grid.extent().rect();
        match self.background_image.as_ref().and_then(ImageSlot::image) {
            Some(image) => out.push(DrawOp::Image {
                rect,
                image: image.clone(),
            }),
            None => out.push(DrawOp::Fill {
                rect,
                color: self.background.clone(),
                radius: 0.0,
            }),
        }
        for node in &self.nodes {
            node.draw(&mut out);
        }
        out
    }

    fn poll_assets(&mut self, loader: &dyn AssetLoader) -> Vec<Diagnostic> {
        let frames = &mut self.frames;
        let background = self
            .background_image
            .as_mut()
            .and_then(|slot| slot.poll(loader, frames))
            .map(|kind| Diagnostic::new(BACKGROUND_LABEL, kind));
        background
            .into_iter()
            .chain(self.nodes.iter_mut().filter_map(|node| {
                let kind = node.poll_assets(loader, frames)?;
                Some(Diagnostic::new(node.label(), kind))
            }))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/tree.rs"]
mod tests;
