use sketchboard_app::{App, Script, UiAction};
use sketchboard_core::config::CanvasConfig;
use sketchboard_core::tools::ToolKind;
use std::path::Path;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbaImage::new(width, height).save(path).unwrap();
}

#[test]
fn upload_transform_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("photo.png");
    write_png(&png, 64, 48);

    let script = Script::from_json(&format!(
        r#"{{
            "actions": [
                {{ "action": "upload_image", "paths": [{png:?}] }},
                {{ "action": "click", "x": 500, "y": 500 }},
                {{ "action": "transform_image" }},
                {{ "action": "select_tool", "tool": "circle" }},
                {{ "action": "pointer_down", "x": 200, "y": 200 }},
                {{ "action": "pointer_move", "x": 203, "y": 204 }},
                {{ "action": "pointer_up", "x": 203, "y": 204 }}
            ]
        }}"#,
        png = png.display().to_string()
    ))
    .unwrap();

    let mut app = App::new(CanvasConfig::default());
    app.run_script(&script).unwrap();

    assert!(app.canvas().overlay().is_selected());
    assert_eq!(app.canvas().registry().len(), 1);

    let svg = app.render_svg();
    assert!(svg.contains("<image href=\"data:image/png;base64,"));
    assert!(svg.contains(r#"width="64" height="48""#));
    // Overlay selected: frame plus corner and rotate handles
    assert!(svg.contains("<circle"));

    app.apply(&UiAction::Clear).unwrap();
    assert!(app.canvas().registry().is_empty());
    assert!(app.canvas().overlay().has_image());

    app.apply(&UiAction::ClearImage).unwrap();
    assert!(!app.render_svg().contains("<image"));
}

#[test]
fn cancelled_file_picker_is_noop() {
    let mut app = App::default();
    app.apply(&UiAction::UploadImage { paths: Vec::new() }).unwrap();
    assert!(!app.canvas().overlay().has_image());
}

#[test]
fn tool_switch_mid_gesture_commits_nothing() {
    let mut app = App::default();
    let actions = [
        UiAction::SelectTool { tool: ToolKind::Pen },
        UiAction::PointerDown { x: 0.0, y: 0.0, shift: false },
        UiAction::PointerMove { x: 5.0, y: 5.0 },
        UiAction::SelectTool { tool: ToolKind::Rectangle },
        UiAction::PointerMove { x: 10.0, y: 10.0 },
        UiAction::PointerUp { x: 10.0, y: 10.0, shift: false },
    ];
    for action in &actions {
        app.apply(action).unwrap();
    }
    assert!(app.canvas().registry().is_empty());
    assert!(!app.canvas().is_drawing());
    assert!(app.gestures().is_idle());
}
