use std::fmt::Write as _;
use townwalk_common::RenderView;
use townwalk_scene::Scene;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene graph and a camera pose, then produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the visible scene. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// List every visible mesh, not just the totals.
    pub list_meshes: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { list_meshes: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let visible: Vec<_> = scene
            .iter()
            .filter(|(id, n)| n.is_mesh() && scene.is_visible(*id))
            .collect();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (nodes={}, meshes={}, visible={}, shadow_casters={}) ===",
            scene.node_count(),
            scene.mesh_count(),
            visible.len(),
            scene.shadow_caster_count()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.3}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z, view.fov
        );

        if self.list_meshes {
            for (id, node) in visible {
                let Ok(p) = scene.world_position(id) else {
                    continue;
                };
                let kind = node.mesh.as_ref().map_or("?", |m| m.primitive.kind());
                let _ = writeln!(
                    out,
                    "  [{}] {:<10} {:<8} pos=({:.2}, {:.2}, {:.2})",
                    id.short(),
                    node.name,
                    kind,
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use townwalk_common::Transform;
    use townwalk_scene::{Capabilities, Material, Mesh, Primitive};

    fn cube(scene: &mut Scene, name: &str, at: Vec3) -> townwalk_common::NodeId {
        scene
            .create_mesh(
                name,
                None,
                Transform::from_xyz(at.x, at.y, at.z),
                Mesh {
                    primitive: Primitive::cuboid(1.0, 1.0, 1.0),
                    material: Material::rgb(1.0, 0.0, 0.0),
                },
                Capabilities::default(),
            )
            .unwrap()
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let output = DebugTextRenderer::new().render(&Scene::new(), &RenderView::default());
        assert!(output.contains("nodes=0"));
        assert!(output.contains("fov=0.800"));
    }

    #[test]
    fn hidden_meshes_are_not_listed() {
        let mut scene = Scene::new();
        cube(&mut scene, "shown", Vec3::new(1.0, 2.0, 3.0));
        let hidden = cube(&mut scene, "hidden", Vec3::ZERO);
        scene.set_visible(hidden, false).unwrap();

        let output = DebugTextRenderer::verbose().render(&scene, &RenderView::default());
        assert!(output.contains("meshes=2, visible=1"));
        assert!(output.contains("shown"));
        assert!(output.contains("pos=(1.00, 2.00, 3.00)"));
        assert!(!output.contains("hidden "));
    }

    #[test]
    fn terse_output_has_totals_only() {
        let mut scene = Scene::new();
        cube(&mut scene, "a", Vec3::ZERO);
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert_eq!(output.lines().count(), 2);
    }
}
