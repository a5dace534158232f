use askama::Template;

use crate::domain::{DomainError, MbtiType};

use super::form::{DisplayState, FormView};

struct CategoryOption {
    label: String,
    dimensions: String,
    selected: bool,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="ja">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>MBTI メッセージ変換</title>
    <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
  </head>
  <body class="bg-slate-50 text-slate-900">
    <main class="container mx-auto p-4 pt-10 max-w-2xl">
      <h1 class="text-3xl font-bold mb-6 text-center text-blue-600">MBTI メッセージ変換</h1>

      <form id="convert-form" method="post" action="/">
        <div class="mb-4">
          <label for="message" class="block text-sm font-medium text-gray-700 mb-1">メッセージを入力:</label>
          <textarea id="message" name="message" rows="4" required
            class="shadow-sm block w-full sm:text-sm border border-gray-300 rounded-md p-2"
            placeholder="ここにメッセージを入力してください..."
            {% if disabled %}disabled{% endif %}>{{ message }}</textarea>
        </div>

        <div class="mb-4">
          <label for="mbti" class="block text-sm font-medium text-gray-700 mb-1">相手のMBTIタイプを選択:</label>
          <select id="mbti" name="mbtiType"
            class="shadow-sm block w-full sm:text-sm border border-gray-300 rounded-md p-2 bg-white"
            {% if disabled %}disabled{% endif %}>
            {% for opt in options %}
            <option value="{{ opt.label }}"{% if opt.selected %} selected{% endif %}>{{ opt.label }}{% if !opt.dimensions.is_empty() %} ({{ opt.dimensions }}){% endif %}</option>
            {% endfor %}
          </select>
        </div>

        <div class="text-center mb-6">
          <button id="submit" type="submit"
            class="inline-flex items-center px-6 py-3 text-base font-medium rounded-md shadow-sm text-white bg-blue-500 hover:bg-blue-600 disabled:opacity-50"
            {% if !can_submit %}disabled{% endif %}>{% if loading %}変換中...{% else %}変換する{% endif %}</button>
        </div>
      </form>

      {% if loading %}
      <div id="loading" class="text-center text-gray-500">変換中...</div>
      {% endif %}
      {% if has_error %}
      <div id="error" class="bg-red-50 p-4 rounded-md border border-red-200 text-red-700">{{ error }}</div>
      {% endif %}
      {% if has_result %}
      <div id="result">
        <h2 class="text-xl font-semibold mb-2">変換結果:</h2>
        <div class="bg-blue-50 p-4 rounded-md border border-blue-200 whitespace-pre-wrap">{{ result }}</div>
      </div>
      {% endif %}
    </main>
    <script>
      const form = document.getElementById("convert-form");
      const message = document.getElementById("message");
      const button = document.getElementById("submit");
      message.addEventListener("input", () => { button.disabled = message.value === ""; });
      form.addEventListener("submit", (event) => {
        if (message.value === "" || button.dataset.pending) { event.preventDefault(); return; }
        button.dataset.pending = "1";
        button.disabled = true;
        button.textContent = "変換中...";
      });
    </script>
  </body>
</html>"#,
    ext = "html"
)]
struct FormPage<'a> {
    message: &'a str,
    options: Vec<CategoryOption>,
    disabled: bool,
    can_submit: bool,
    loading: bool,
    has_error: bool,
    error: &'a str,
    has_result: bool,
    result: &'a str,
}

/// Render the whole page for the view's current state.
pub fn render_page(view: &FormView) -> Result<String, DomainError> {
    let (error, result) = match view.state() {
        DisplayState::Error(e) => (Some(e.as_str()), None),
        DisplayState::Result(r) => (None, Some(r.as_str())),
        DisplayState::Idle | DisplayState::Loading => (None, None),
    };

    let mut options: Vec<CategoryOption> = MbtiType::ALL
        .iter()
        .map(|t| CategoryOption {
            label: t.as_str().to_string(),
            dimensions: t.dimensions(),
            selected: t.as_str() == view.category(),
        })
        .collect();

    // A free-text label posted to the form stays selected on the next render.
    if !view.category().is_empty() && !options.iter().any(|o| o.selected) {
        options.insert(
            0,
            CategoryOption {
                label: view.category().to_string(),
                dimensions: String::new(),
                selected: true,
            },
        );
    }

    let page = FormPage {
        message: view.message(),
        options,
        disabled: view.controls_disabled(),
        can_submit: view.can_submit(),
        loading: view.is_loading(),
        has_error: error.is_some(),
        error: error.unwrap_or_default(),
        has_result: result.is_some(),
        result: result.unwrap_or_default(),
    };

    page.render()
        .map_err(|e| DomainError::internal(format!("failed to render form page: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::EndpointReply;

    #[test]
    fn test_idle_page() {
        let html = render_page(&FormView::new()).unwrap();
        assert!(html.contains("MBTI メッセージ変換"));
        assert!(html.contains(r#"<option value="INTJ" selected>"#));
        assert_eq!(html.matches("<option ").count(), 16);
        assert!(!html.contains(r#"id="error""#));
        assert!(!html.contains(r#"id="result""#));
    }

    #[test]
    fn test_unknown_label_stays_selected() {
        let mut view = FormView::new();
        view.select_category("ABCD").unwrap();

        let html = render_page(&view).unwrap();
        assert!(html.contains(r#"<option value="ABCD" selected>ABCD</option>"#));
        assert!(html.contains(r#"<option value="INTJ">"#));
        assert_eq!(html.matches("<option ").count(), 17);
        assert_eq!(html.matches(" selected>").count(), 1);
    }

    #[test]
    fn test_loading_page_disables_controls() {
        let mut view = FormView::new();
        view.set_message("hello").unwrap();
        view.submit().unwrap();

        let html = render_page(&view).unwrap();
        assert!(html.contains(r#"id="loading""#));
        assert!(html.contains("disabled>hello</textarea>"));
        assert!(html.contains("disabled>変換中...</button>"));
    }

    #[test]
    fn test_result_is_escaped() {
        let mut view = FormView::new();
        view.set_message("<b>hi</b>").unwrap();
        view.submit().unwrap();
        view.complete(Ok(EndpointReply::new(
            200,
            r#"{"convertedMessage":"<script>alert(1)</script>"}"#,
        )));

        let html = render_page(&view).unwrap();
        assert!(html.contains(r#"id="result""#));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(!html.contains("<b>hi</b>"));
    }

    #[test]
    fn test_error_page_shows_message() {
        let mut view = FormView::new();
        view.set_message("hello").unwrap();
        view.submit().unwrap();
        view.complete(Ok(EndpointReply::new(
            500,
            r#"{"error":"OpenAI APIキーが設定されていません"}"#,
        )));

        let html = render_page(&view).unwrap();
        assert!(html.contains("OpenAI APIキーが設定されていません"));
        assert!(!html.contains(r#"id="loading""#));
    }
}
