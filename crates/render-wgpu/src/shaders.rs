/// WGSL shader for instanced primitives: hemispheric plus sun lighting,
/// linear distance fog toward the sky colour.
pub const WORLD_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    // x = fog start, y = fog end
    fog: vec4<f32>,
    sky: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) world_pos: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    out.world_pos = world_pos.xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let sun_dir = normalize(vec3<f32>(1.0, 3.0, 1.0));
    let sky_light = vec3<f32>(0.6, 0.6, 0.6);
    let ground_light = vec3<f32>(0.3, 0.35, 0.4) * 0.6;
    let hemi = mix(ground_light, sky_light, n.y * 0.5 + 0.5);
    let sun = max(dot(n, sun_dir), 0.0) * 0.8;
    let lit = in.color.rgb * (hemi + vec3<f32>(sun));

    let dist = distance(in.world_pos, uniforms.eye.xyz);
    let fog = clamp((dist - uniforms.fog.x) / max(uniforms.fog.y - uniforms.fog.x, 0.001), 0.0, 1.0);
    return vec4<f32>(mix(lit, uniforms.sky.rgb, fog), in.color.a);
}
"#;
