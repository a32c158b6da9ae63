//! Scene serialization.
//!
//! Geometry is produced as plain [`Scene`] values; this module turns a scene
//! into text. SDF is what the simulator loads, JSON is for inspection and
//! downstream tooling.

use graph_types::{PanelMaterial, Scene, WallPanel};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::FormatError;

/// SDF version written in the root element.
pub const SDF_VERSION: &str = "1.6";

/// Script file holding the simulator's named material presets.
pub const MATERIAL_SCRIPT_URI: &str = "file://media/materials/scripts/gazebo.material";

/// A way of rendering a scene as text.
pub trait SceneFormat {
    fn render(&self, scene: &Scene) -> Result<String, FormatError>;
}

/// Output format selectable at the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Simulator world file
    #[default]
    Sdf,
    /// Pretty-printed JSON of the panel list
    Json,
}

impl OutputFormat {
    pub fn render(self, scene: &Scene) -> Result<String, FormatError> {
        match self {
            OutputFormat::Sdf => SdfFormat::default().render(scene),
            OutputFormat::Json => JsonFormat.render(scene),
        }
    }
}

/// Renders a scene as an SDF world with a ground plane and sun.
#[derive(Debug, Clone)]
pub struct SdfFormat {
    /// Models pulled into the world ahead of the generated panels
    pub includes: Vec<String>,
}

impl Default for SdfFormat {
    fn default() -> Self {
        Self {
            includes: vec![
                "model://ground_plane".to_string(),
                "model://sun".to_string(),
            ],
        }
    }
}

impl SceneFormat for SdfFormat {
    fn render(&self, scene: &Scene) -> Result<String, FormatError> {
        let mut out = XmlOut::new();

        out.event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        out.open("sdf", &[("version", SDF_VERSION)])?;
        out.open("world", &[("name", scene.world_name.as_str())])?;
        for uri in &self.includes {
            out.open("include", &[])?;
            out.leaf("uri", uri)?;
            out.close("include")?;
        }
        for panel in &scene.panels {
            write_panel(&mut out, panel)?;
        }
        out.close("world")?;
        out.close("sdf")?;

        out.finish()
    }
}

/// Renders a scene as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl SceneFormat for JsonFormat {
    fn render(&self, scene: &Scene) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(scene)?;
        json.push('\n');
        Ok(json)
    }
}

fn write_panel(out: &mut XmlOut, panel: &WallPanel) -> Result<(), FormatError> {
    let pose = format!(
        "{:.6} {:.6} {:.3} 0 0 {:.12}",
        panel.center.x,
        panel.center.y,
        panel.elevation(),
        panel.yaw
    );
    let size = format!("{} {} {}", panel.length, panel.thickness, panel.height);

    out.open("model", &[("name", panel.name.as_str())])?;
    out.leaf("static", "true")?;
    out.leaf("pose", &pose)?;
    out.open("link", &[("name", "link")])?;

    out.open("visual", &[("name", "vis")])?;
    write_box(out, &size)?;
    write_material(out, &panel.material)?;
    out.close("visual")?;

    out.open("collision", &[("name", "col")])?;
    write_box(out, &size)?;
    out.close("collision")?;

    out.close("link")?;
    out.close("model")
}

fn write_box(out: &mut XmlOut, size: &str) -> Result<(), FormatError> {
    out.open("geometry", &[])?;
    out.open("box", &[])?;
    out.leaf("size", size)?;
    out.close("box")?;
    out.close("geometry")
}

fn write_material(out: &mut XmlOut, material: &PanelMaterial) -> Result<(), FormatError> {
    out.open("material", &[])?;
    match material {
        PanelMaterial::Preset { name } => {
            out.open("script", &[])?;
            out.leaf("uri", MATERIAL_SCRIPT_URI)?;
            out.leaf("name", name)?;
            out.close("script")?;
        }
        PanelMaterial::Translucent { color } => {
            let rgba = format!("{} {} {} {}", color.r, color.g, color.b, color.a);
            out.leaf("ambient", &rgba)?;
            out.leaf("diffuse", &rgba)?;
            out.leaf("specular", "0.1 0.1 0.1 1")?;
            out.leaf("emissive", "0 0 0 1")?;
        }
    }
    out.close("material")
}

/// Thin wrapper over an indenting quick-xml writer.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), FormatError> {
        self.writer
            .write_event(event)
            .map_err(|e| FormatError::Xml(e.to_string()))
    }

    fn open(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), FormatError> {
        let mut start = BytesStart::new(tag);
        for &attribute in attributes {
            start.push_attribute(attribute);
        }
        self.event(Event::Start(start))
    }

    fn close(&mut self, tag: &str) -> Result<(), FormatError> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// Writes `<tag>text</tag>` on one line.
    fn leaf(&mut self, tag: &str, text: &str) -> Result<(), FormatError> {
        self.open(tag, &[])?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    fn finish(self) -> Result<String, FormatError> {
        let mut text = String::from_utf8(self.writer.into_inner())
            .map_err(|e| FormatError::Xml(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_types::{PanelStyle, Point};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new("graph_routes");
        scene.push(WallPanel::new(
            "edge0_L",
            Point::new(1.0, 2.0),
            0.5,
            4.0,
            0.1,
            1.0,
            &PanelStyle::new("Gazebo/DarkGrey", [0.3, 0.3, 0.3], 1.0),
        ));
        scene.push(WallPanel::new(
            "node_A_seg0",
            Point::new(-1.0, 0.0),
            1.5,
            0.0,
            0.1,
            1.0,
            &PanelStyle::new("Gazebo/Blue", [0.0, 0.0, 1.0], 0.05),
        ));
        scene
    }

    #[test]
    fn test_sdf_wrapper() {
        let sdf = SdfFormat::default().render(&sample_scene()).unwrap();

        assert!(sdf.starts_with("<?xml version=\"1.0\"?>"));
        assert!(sdf.contains("<sdf version=\"1.6\">"));
        assert!(sdf.contains("<world name=\"graph_routes\">"));
        assert!(sdf.contains("<uri>model://ground_plane</uri>"));
        assert!(sdf.contains("<uri>model://sun</uri>"));
        assert!(sdf.trim_end().ends_with("</sdf>"));
    }

    #[test]
    fn test_sdf_one_model_per_panel() {
        let sdf = SdfFormat::default().render(&sample_scene()).unwrap();

        assert_eq!(sdf.matches("<model ").count(), 2);
        assert_eq!(sdf.matches("<collision ").count(), 2);
        assert!(sdf.contains("<model name=\"edge0_L\">"));
        assert!(sdf.contains("<static>true</static>"));
    }

    #[test]
    fn test_sdf_pose_and_size() {
        let sdf = SdfFormat::default().render(&sample_scene()).unwrap();

        assert!(sdf.contains("<pose>1.000000 2.000000 0.500 0 0 0.500000000000</pose>"));
        assert!(sdf.contains("<size>4 0.1 1</size>"));
        // Zero length is floored before serialization.
        assert!(sdf.contains("<size>0.001 0.1 1</size>"));
    }

    #[test]
    fn test_sdf_materials() {
        let sdf = SdfFormat::default().render(&sample_scene()).unwrap();

        assert!(sdf.contains("<name>Gazebo/DarkGrey</name>"));
        assert!(sdf.contains(MATERIAL_SCRIPT_URI));
        assert!(sdf.contains("<ambient>0 0 1 0.05</ambient>"));
        assert!(sdf.contains("<diffuse>0 0 1 0.05</diffuse>"));
    }

    #[test]
    fn test_sdf_escapes_names() {
        let mut scene = Scene::new("a<b");
        scene.push(WallPanel::new(
            "node_x&y_seg0",
            Point::ORIGIN,
            0.0,
            1.0,
            0.1,
            1.0,
            &PanelStyle::new("Gazebo/Blue", [0.0, 0.0, 1.0], 1.0),
        ));
        let sdf = SdfFormat::default().render(&scene).unwrap();

        assert!(sdf.contains("node_x&amp;y_seg0"));
        assert!(sdf.contains("a&lt;b"));
    }

    #[test]
    fn test_empty_scene_is_valid() {
        let sdf = SdfFormat::default().render(&Scene::new("empty")).unwrap();

        assert!(!sdf.contains("<model"));
        assert!(sdf.contains("<world name=\"empty\">"));
    }

    #[test]
    fn test_json_format() {
        let json = JsonFormat.render(&sample_scene()).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();

        assert_eq!(back, sample_scene());
        assert!(json.contains("\"type\": \"translucent\""));
    }

    #[test]
    fn test_output_format_dispatch() {
        let scene = sample_scene();

        assert!(OutputFormat::Sdf.render(&scene).unwrap().contains("<sdf"));
        assert!(OutputFormat::Json.render(&scene).unwrap().starts_with('{'));
    }

    #[test]
    fn test_output_format_cli_names() {
        use clap::ValueEnum;

        assert_eq!(OutputFormat::from_str("sdf", false), Ok(OutputFormat::Sdf));
        assert_eq!(OutputFormat::from_str("json", false), Ok(OutputFormat::Json));
        assert!(OutputFormat::from_str("yaml", false).is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Sdf);
    }
}
