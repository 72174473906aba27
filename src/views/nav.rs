//! ボトムナビと新規スキャンボタン

use agriscan_common::{MapLayer, SessionState, View};

/// 対話メニューの1項目
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Navigate(View),
    NewScan,
    OpenScan(usize),
    Layer(MapLayer),
    ChangeLanguage,
    EditName,
    Back,
    Quit,
}

/// 現在の画面で選べる項目と表示名
pub fn menu(state: &SessionState, scan_count: usize) -> Vec<(MenuItem, String)> {
    let mut items = Vec::new();

    if state.shows_fab() {
        items.push((MenuItem::NewScan, format!("＋ {}", state.t("newScan"))));
    }

    match state.current_view {
        View::Dashboard => {
            for index in 0..scan_count {
                items.push((
                    MenuItem::OpenScan(index),
                    format!("{} [{}]", state.t("viewDetails"), index + 1),
                ));
            }
        }
        View::Map => {
            for layer in MapLayer::ALL {
                if layer != state.map_layer {
                    items.push((MenuItem::Layer(layer), layer.name().to_string()));
                }
            }
        }
        View::Report => {
            items.push((MenuItem::Back, "← Back".to_string()));
        }
        View::Settings => {
            items.push((MenuItem::ChangeLanguage, state.t("language").to_string()));
            items.push((MenuItem::EditName, state.t("profile").to_string()));
            items.push((MenuItem::Back, "← Back".to_string()));
        }
    }

    for view in View::ALL {
        let label = state.t(view.label_key());
        let label = if view == state.current_view {
            format!("● {}", label)
        } else {
            format!("  {}", label)
        };
        items.push((MenuItem::Navigate(view), label));
    }

    items.push((MenuItem::Quit, "Quit".to_string()));
    items
}
