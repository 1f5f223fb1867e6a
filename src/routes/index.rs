use maud::{Markup, html};

pub async fn get_test_page() -> Markup {
    html! {
        h1 { "Student Records App" }
    }
}
