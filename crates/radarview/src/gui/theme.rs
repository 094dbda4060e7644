use cairo::Context;
use gtk::gdk;
use gtk4 as gtk;
use radar::Color;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.radar-window, .radar-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

/// Clears the whole clip area to the chart background.
pub fn paint_background(cr: &Context, color: Color) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.save()?;
    cr.set_operator(cairo::Operator::Source);
    cr.set_source_rgba(r, g, b, a);
    cr.paint()?;
    cr.restore()
}
