use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #111; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.15); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
main { padding: 1rem 1.5rem; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border-bottom: 1px solid #e5e7eb; padding: 0.35rem 0.5rem; vertical-align: top; text-align: left; }
th .heading { display: flex; justify-content: space-between; gap: 1rem; white-space: nowrap; }
th.active .heading { color: #524ed2; }
th details { font-weight: normal; max-height: 14rem; overflow: auto; }
th input[type=number] { width: 5rem; }
td.money { display: flex; justify-content: space-between; gap: 0.25rem; }
td.negative { color: #dc2626; }
tr.filler td { color: transparent; }
a.sort { text-decoration: none; font-size: 0.75rem; padding: 0 0.25rem; border-radius: 4px; }
a.sort.sorted { background: #eef; }
.options span { margin-right: 0.5rem; }
.toolbar, .pagination { display: flex; gap: 1rem; align-items: center; padding: 0.75rem 0; }
.count { color: #6b7280; font-size: 0.8rem; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Vehicle Inventory" }
                    nav {
                        ul {
                            li { a href="/" { "Table" } }
                            li { a href="/api/inventory" { "JSON" } }
                            li { a href="/api/listFiles" { "Snapshots" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
