use hsp_types::SignalRecord;

/// One line per record: the kind name followed by `field=value` pairs.
///
/// ```text
/// window-creation-succeeded
/// hook-installed width=1920 height=1080
/// mouse-moved x=640 y=480
/// mouse-clicked x=640 y=480
/// window-title-changed title="Untitled - Notepad"
/// key-pressed key=F3 code=0x72
/// ```
///
/// Titles are quoted with Rust string escaping, so control characters
/// and embedded quotes stay on one line.
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_all(records: &[&SignalRecord]) -> String {
        records
            .iter()
            .map(|record| Self::render_record(record))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_record(record: &SignalRecord) -> String {
        let kind = record.kind();
        match record {
            SignalRecord::WindowCreationFailed | SignalRecord::WindowCreationSucceeded => {
                kind.to_string()
            }
            SignalRecord::HookInstalled(screen) => {
                format!("{kind} width={} height={}", screen.width, screen.height)
            }
            SignalRecord::MouseMoved(point) | SignalRecord::MouseClicked(point) => {
                format!("{kind} x={} y={}", point.x, point.y)
            }
            SignalRecord::KeyPressed(key) => {
                format!("{kind} key={key} code={:#04x}", key.to_wire_byte())
            }
            SignalRecord::WindowTitleChanged(title) => format!("{kind} title={title:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hsp_types::{KeyCode, Point, ScreenSize};

    #[test]
    fn field_layout() {
        assert_eq!(
            TextRenderer::render_record(&SignalRecord::HookInstalled(ScreenSize::new(1920, 1080))),
            "hook-installed width=1920 height=1080"
        );
        assert_eq!(
            TextRenderer::render_record(&SignalRecord::MouseClicked(Point::new(1, 2))),
            "mouse-clicked x=1 y=2"
        );
        assert_eq!(
            TextRenderer::render_record(&SignalRecord::KeyPressed(KeyCode::Escape)),
            "key-pressed key=Esc code=0x1b"
        );
        assert_eq!(
            TextRenderer::render_record(&SignalRecord::WindowCreationFailed),
            "window-creation-failed"
        );
    }

    #[test]
    fn title_is_escaped() {
        let record = SignalRecord::WindowTitleChanged("say \"hi\"\n".to_string());
        assert_eq!(
            TextRenderer::render_record(&record),
            r#"window-title-changed title="say \"hi\"\n""#
        );
    }

    #[test]
    fn lines_joined() {
        let a = SignalRecord::WindowCreationSucceeded;
        let b = SignalRecord::MouseMoved(Point::new(3, 4));
        assert_eq!(
            TextRenderer::render_all(&[&a, &b]),
            "window-creation-succeeded\nmouse-moved x=3 y=4"
        );
    }
}
