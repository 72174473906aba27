//! フィールドマップの表示モデル

use crate::demo::{self, NdviZone, PestMarker, NDVI_ZONES, PEST_MARKERS};
use crate::state::{MapLayer, SessionState};
use crate::types::MapLayers;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerTab {
    pub layer: MapLayer,
    pub name: &'static str,
    pub active: bool,
}

/// レイヤーごとの重ね表示
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// 通常画像のみ
    Plain,
    Ndvi(&'static [NdviZone]),
    Pests(&'static [PestMarker]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapModel {
    pub field_name: String,
    pub active: MapLayer,
    pub tabs: Vec<LayerTab>,
    /// バックエンドが返したレイヤー画像（無ければ描画側の既定背景）
    pub image_url: Option<String>,
    pub overlay: Overlay,
}

impl FieldMapModel {
    pub fn build(state: &SessionState) -> Self {
        let active = state.map_layer;
        let tabs = MapLayer::ALL
            .into_iter()
            .map(|layer| LayerTab {
                layer,
                name: layer.name(),
                active: layer == active,
            })
            .collect();

        let overlay = match active {
            MapLayer::Rgb => Overlay::Plain,
            MapLayer::Ndvi => Overlay::Ndvi(&NDVI_ZONES),
            MapLayer::Pest => Overlay::Pests(&PEST_MARKERS),
        };

        Self {
            field_name: state
                .selected_scan
                .as_ref()
                .map(|s| s.field_name.clone())
                .unwrap_or_else(|| demo::DEMO_FIELD_NAME.to_string()),
            active,
            tabs,
            image_url: state
                .map_layers
                .as_ref()
                .and_then(|layers| layer_image_url(layers, active))
                .map(str::to_string),
            overlay,
        }
    }
}

pub fn layer_image_url(layers: &MapLayers, layer: MapLayer) -> Option<&str> {
    match layer {
        MapLayer::Rgb => layers.rgb_url.as_deref(),
        MapLayer::Ndvi => layers.ndvi_url.as_deref(),
        MapLayer::Pest => layers.pest_map_url.as_deref(),
    }
}

/// NDVIゾーンマーカーの配置（%）
pub fn zone_position(index: usize) -> (f64, f64) {
    (15.0 + index as f64 * 18.0, 20.0 + (index % 2) as f64 * 30.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, RequestKind};
    use crate::types::{ScanId, ScanView};

    #[test]
    fn test_default_layer_is_rgb() {
        let model = FieldMapModel::build(&SessionState::new());
        assert_eq!(model.active, MapLayer::Rgb);
        assert_eq!(model.overlay, Overlay::Plain);
        assert_eq!(model.field_name, "Field A - North Section");
        assert_eq!(model.tabs.iter().filter(|t| t.active).count(), 1);
    }

    #[test]
    fn test_invalid_layer_still_renders() {
        let mut state = SessionState::new();
        state.dispatch(Action::map_layer_tag("invalid"));
        let model = FieldMapModel::build(&state);
        assert_eq!(model.active, MapLayer::Rgb);
        assert!(model.tabs[0].active);
    }

    #[test]
    fn test_overlays_per_layer() {
        let mut state = SessionState::new();
        state.dispatch(Action::SetMapLayer(MapLayer::Ndvi));
        match FieldMapModel::build(&state).overlay {
            Overlay::Ndvi(zones) => assert_eq!(zones.len(), 5),
            other => panic!("NDVIでない: {:?}", other),
        }

        state.dispatch(Action::SetMapLayer(MapLayer::Pest));
        match FieldMapModel::build(&state).overlay {
            Overlay::Pests(pests) => assert_eq!(pests.len(), 3),
            other => panic!("害虫でない: {:?}", other),
        }
    }

    #[test]
    fn test_layer_image_from_backend() {
        let mut state = SessionState::new();
        state.dispatch(Action::OpenScan(ScanView::new(ScanId::from("7"), "Scan #7")));
        let token = state.begin(RequestKind::MapLayers).expect("開始できない");
        state.dispatch(Action::MapLayersResolved {
            token,
            layers: Some(MapLayers {
                rgb_url: Some("https://img/rgb.jpg".to_string()),
                ndvi_url: None,
                pest_map_url: Some("https://img/pest.jpg".to_string()),
            }),
        });

        let model = FieldMapModel::build(&state);
        assert_eq!(model.field_name, "Scan #7");
        assert_eq!(model.image_url.as_deref(), Some("https://img/rgb.jpg"));

        state.dispatch(Action::SetMapLayer(MapLayer::Ndvi));
        assert_eq!(FieldMapModel::build(&state).image_url, None);
    }

    #[test]
    fn test_zone_position() {
        assert_eq!(zone_position(0), (15.0, 20.0));
        assert_eq!(zone_position(1), (33.0, 50.0));
        assert_eq!(zone_position(4), (87.0, 20.0));
    }
}
