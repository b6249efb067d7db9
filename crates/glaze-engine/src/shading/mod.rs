//! Shading stage for UI meshes.
//!
//! The GPU program lives in `shaders/ui.wgsl`. Everything here describes its
//! interface (vertex layout, uniform layout, entry points) plus a CPU reference
//! of both stages with identical semantics.

mod color;
mod stage;
mod uniform;
mod vertex;

pub use color::{LinearRgba, PackedColor};
pub use stage::{fragment_stage, pixel_to_clip, vertex_stage, ShadedVertex};
pub use uniform::ScreenUniform;
pub use vertex::Vertex;

/// WGSL source for the UI pipeline.
pub const UI_SHADER_SRC: &str = include_str!("shaders/ui.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::naga::{
        AddressSpace, Binding, BuiltIn, EntryPoint, Function, Module, ResourceBinding, Scalar,
        ShaderStage, TypeInner, VectorSize,
    };

    fn parse_validated() -> Module {
        let module = wgpu::naga::front::wgsl::parse_str(UI_SHADER_SRC).unwrap_or_else(|e| {
            panic!("ui.wgsl failed to parse:\n{}", e.emit_to_string(UI_SHADER_SRC))
        });
        wgpu::naga::valid::Validator::new(
            wgpu::naga::valid::ValidationFlags::all(),
            wgpu::naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("ui.wgsl failed validation: {e:?}"));
        module
    }

    fn entry<'m>(module: &'m Module, name: &str) -> &'m EntryPoint {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .unwrap_or_else(|| panic!("missing entry point {name}"))
    }

    /// `(location, type)` of every user-defined input, flattening struct arguments.
    fn input_locations(module: &Module, func: &Function) -> Vec<(u32, TypeInner)> {
        let mut out = Vec::new();
        for arg in &func.arguments {
            match (&arg.binding, &module.types[arg.ty].inner) {
                (Some(Binding::Location { location, .. }), inner) => {
                    out.push((*location, inner.clone()));
                }
                (None, TypeInner::Struct { members, .. }) => {
                    for m in members {
                        if let Some(Binding::Location { location, .. }) = m.binding {
                            out.push((location, module.types[m.ty].inner.clone()));
                        }
                    }
                }
                _ => {}
            }
        }
        out.sort_by_key(|(loc, _)| *loc);
        out
    }

    const VEC2_F32: TypeInner = TypeInner::Vector { size: VectorSize::Bi, scalar: Scalar::F32 };
    const VEC4_F32: TypeInner = TypeInner::Vector { size: VectorSize::Quad, scalar: Scalar::F32 };

    #[test]
    fn shader_parses_and_validates() {
        let module = parse_validated();
        assert_eq!(module.entry_points.len(), 2);
    }

    #[test]
    fn entry_points_have_expected_stages() {
        let module = parse_validated();
        assert_eq!(entry(&module, VERTEX_ENTRY).stage, ShaderStage::Vertex);
        assert_eq!(entry(&module, FRAGMENT_ENTRY).stage, ShaderStage::Fragment);
    }

    #[test]
    fn screen_uniform_is_bound_at_group_zero_binding_zero() {
        let module = parse_validated();
        let uniforms: Vec<_> = module
            .global_variables
            .iter()
            .map(|(_, var)| var)
            .filter(|var| var.space == AddressSpace::Uniform)
            .collect();

        assert_eq!(uniforms.len(), 1);
        assert_eq!(uniforms[0].binding, Some(ResourceBinding { group: 0, binding: 0 }));
        match &module.types[uniforms[0].ty].inner {
            TypeInner::Struct { span, .. } => {
                assert_eq!(*span as usize, std::mem::size_of::<ScreenUniform>());
            }
            other => panic!("screen uniform is not a struct: {other:?}"),
        }
    }

    #[test]
    fn vertex_inputs_match_vertex_layout() {
        let module = parse_validated();
        let inputs = input_locations(&module, &entry(&module, VERTEX_ENTRY).function);

        assert_eq!(
            inputs,
            vec![
                (0, VEC2_F32),
                (1, VEC2_F32),
                (2, TypeInner::Scalar(Scalar::U32)),
            ]
        );
        for (attr, (location, _)) in Vertex::ATTRS.iter().zip(&inputs) {
            assert_eq!(attr.shader_location, *location);
        }
    }

    #[test]
    fn fragment_writes_single_color_target_without_depth() {
        let module = parse_validated();
        let fs = &entry(&module, FRAGMENT_ENTRY).function;
        let result = fs.result.as_ref().expect("fragment stage returns a value");

        assert!(matches!(result.binding, Some(Binding::Location { location: 0, .. })));
        assert_eq!(module.types[result.ty].inner, VEC4_F32);

        let depth = Some(Binding::BuiltIn(BuiltIn::FragDepth));
        let writes_depth = match &module.types[result.ty].inner {
            TypeInner::Struct { members, .. } => members.iter().any(|m| m.binding == depth),
            _ => result.binding == depth,
        };
        assert!(!writes_depth);
    }

    #[test]
    fn vertex_stage_outputs_clip_position_and_color() {
        let module = parse_validated();
        let vs = &entry(&module, VERTEX_ENTRY).function;
        let result = vs.result.as_ref().expect("vertex stage returns a value");

        let TypeInner::Struct { members, .. } = &module.types[result.ty].inner else {
            panic!("vertex output is not a struct");
        };
        assert!(members
            .iter()
            .any(|m| matches!(m.binding, Some(Binding::BuiltIn(BuiltIn::Position { .. })))));
        let color = members
            .iter()
            .find(|m| matches!(m.binding, Some(Binding::Location { location: 0, .. })))
            .expect("color varying at location 0");
        assert_eq!(module.types[color.ty].inner, VEC4_F32);
    }
}
