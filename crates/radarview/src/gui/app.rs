use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::CairoSurface;
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use radar::{ChartView, RadarRenderer};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub renderer: Rc<RefCell<RadarRenderer>>,
    pub title: String,
    pub size: (i32, i32),
    pub default_size: (i32, i32),
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some(model.title.as_str()),
            set_default_size: (model.default_size.0, model.default_size.1),
            add_css_class: "radar-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "radar-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let model = AppModel {
            renderer: Rc::new(RefCell::new(RadarRenderer::new(config.radar_style()))),
            title: config.window.title.clone(),
            size: (0, 0),
            default_size: (config.window.width, config.window.height),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let renderer = model.renderer.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let renderer = renderer.borrow();
                let result = theme::paint_background(cr, renderer.style().background_color)
                    .and_then(|_| renderer.draw(&mut CairoSurface::new(cr)));
                if let Err(e) = result {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Resize(width, height) => {
                let (old_width, old_height) = self.size;
                self.size = (width, height);
                self.renderer
                    .borrow_mut()
                    .size_changed(width, height, old_width, old_height);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let mut renderer = self.renderer.borrow_mut();
                    renderer.set_style(new_config.radar_style());
                    renderer.resize(self.size.0, self.size.1);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }
}
