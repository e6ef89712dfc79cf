use std::io::Write;

use layers::labels::label_text;
use layers::{LayerDescriptor, LayerId, Primitive};
use runtime::CameraState;
use scene::{NodeSet, SceneSummary};
use serde::Serialize;

use crate::error::ExportError;

/// One composed frame with geometry resolved, for an external rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameExport<'a> {
    pub camera: CameraState,
    pub summary: SceneSummary,
    pub layers: Vec<ExportedLayer<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedLayer<'a> {
    pub id: LayerId,
    pub name: &'static str,
    pub primitive: Primitive,
    pub opacity: f32,
    pub pickable: bool,
    pub items: Vec<ExportedItem<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedItem<'a> {
    pub id: &'a str,
    pub position: [f64; 2],
    /// Radius (circles) or text height (labels) in map units at the camera zoom.
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<[u8; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<[u8; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width_px: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

pub fn frame<'a>(
    camera: CameraState,
    nodes: &'a NodeSet,
    layers: &[LayerDescriptor],
) -> FrameExport<'a> {
    let layers = layers
        .iter()
        .map(|layer| ExportedLayer {
            id: layer.id,
            name: layer.slot.name(),
            primitive: layer.primitive,
            opacity: layer.opacity,
            pickable: layer.pickable,
            items: layer
                .nodes
                .iter()
                .filter_map(|&index| nodes.get(index))
                .map(|node| {
                    let style = &layer.style;
                    ExportedItem {
                        id: node.id.as_str(),
                        position: [node.position.x, node.position.y],
                        size: style.size.world_size(node, camera.zoom),
                        fill: style.fill.map(|p| p.resolve(node).to_array()),
                        stroke: style.stroke.map(|s| s.paint.resolve(node).to_array()),
                        stroke_width_px: style.stroke.map(|s| s.width_px),
                        text: style.text.map(|_| label_text(node)),
                    }
                })
                .collect(),
        })
        .collect();
    FrameExport {
        camera,
        summary: nodes.summary(),
        layers,
    }
}

pub fn export_frame(
    camera: CameraState,
    nodes: &NodeSet,
    layers: &[LayerDescriptor],
) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&frame(camera, nodes, layers))?)
}

pub fn write_frame<W: Write>(
    mut writer: W,
    camera: CameraState,
    nodes: &NodeSet,
    layers: &[LayerDescriptor],
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, &frame(camera, nodes, layers))?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{export_frame, frame};
    use layers::{LayerSlot, ViewState, compose};
    use runtime::{CameraState, ViewerConfig};
    use scene::visibility::LodPolicy;
    use scene::{LayoutConfig, Row, aggregate, layout};

    #[test]
    fn overview_frame_has_department_geometry() {
        let rows = [Row::new("Sales", 400.0), Row::new("Legal", 100.0)];
        let nodes = layout(&aggregate(&rows), &LayoutConfig::seeded(0));
        let camera = CameraState::initial(&nodes, &ViewerConfig::default());
        let layers = compose(&nodes, &LodPolicy::default(), &ViewState::at_zoom(camera.zoom));

        let exported = frame(camera, &nodes, &layers);
        assert_eq!(exported.layers.len(), 2);
        assert_eq!(exported.layers[0].name, LayerSlot::DepartmentCircles.name());
        let sales = &exported.layers[0].items[0];
        assert_eq!(sales.size, 110.0);
        assert_eq!(sales.fill.map(|c| c[..3].to_vec()), Some(vec![245, 166, 35]));
        assert_eq!(
            exported.layers[1].items[0].text.as_deref(),
            Some("Sales")
        );
    }

    #[test]
    fn export_is_valid_json() {
        let nodes = layout(&aggregate(&[Row::new("Ops", 1.0)]), &LayoutConfig::seeded(0));
        let camera = CameraState::initial(&nodes, &ViewerConfig::default());
        let layers = compose(&nodes, &LodPolicy::default(), &ViewState::at_zoom(camera.zoom));
        let json = export_frame(camera, &nodes, &layers).expect("export");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["summary"]["department_count"], 1);
        assert_eq!(value["camera"]["zoom"], 3.5);
    }
}
