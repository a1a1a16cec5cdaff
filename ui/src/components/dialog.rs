use widgetry::{
    DrawBaselayer, EventCtx, GfxCtx, Line, Outcome, Panel, State, Text, Widget,
};

use model::{Command, Dialog};

use crate::{App, Transition};

/// The FAQ or contact information. While open, the URL fragment names the dialog instead of the
/// selected stop.
pub struct InfoDialog {
    panel: Panel,
}

impl InfoDialog {
    pub fn new_state(ctx: &mut EventCtx, dialog: Dialog) -> Box<dyn State<App>> {
        let (title, sections) = match dialog {
            Dialog::Faq => ("Der Reichweiten-Checker by WDR aktuell", FAQ),
            Dialog::Contact => ("Kontakt", CONTACT),
        };

        let mut col = vec![Widget::row(vec![
            Line(title).small_heading().into_widget(ctx),
            ctx.style().btn_close_widget(ctx),
        ])];
        for (heading, paragraph) in sections {
            if !heading.is_empty() {
                col.push(Line(*heading).small_heading().into_widget(ctx));
            }
            col.push(
                Text::from(Line(*paragraph))
                    .wrap_to_pct(ctx, 50)
                    .into_widget(ctx),
            );
        }
        col.push(
            ctx.style()
                .btn_solid_primary
                .text("Schließen")
                .build_def(ctx),
        );

        Box::new(Self {
            panel: Panel::new_builder(Widget::col(col)).build(ctx),
        })
    }

    fn close(app: &mut App) -> Transition {
        app.session.dialog_closed();
        Transition::Pop
    }
}

impl State<App> for InfoDialog {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        // Navigation still happens while the dialog is open
        for command in app.update(ctx) {
            match command {
                Command::Open(dialog) => {
                    return Transition::Replace(Self::new_state(ctx, dialog));
                }
                Command::CloseDialogs => {
                    return Self::close(app);
                }
                Command::Fetch(_) => {}
            }
        }

        if let Outcome::Clicked(x) = self.panel.event(ctx) {
            match x.as_ref() {
                "close" | "Schließen" => {
                    return Self::close(app);
                }
                _ => unreachable!(),
            }
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
    }

    fn draw_baselayer(&self) -> DrawBaselayer {
        DrawBaselayer::PreviousState
    }
}

const FAQ: &[(&str, &str)] = &[
    (
        "Was sehe ich hier?",
        "Hier ist dargestellt, wie gut die Haltestellen von öffentlichen Verkehrsmitteln in NRW \
         angebunden sind. Zu jeder Station gibt es die Zahl der Abfahrten pro Stunde und die \
         Verkehrsmittel, die dort fahren. Je dunkler ein Feld in der Grafik der Abfahrten, desto \
         mehr Abfahrten gibt es in dieser Stunde. Die Karte zeigt alle Haltestellen, die von der \
         gewählten Haltestelle aus in einer Stunde Fahrtzeit erreichbar sind.",
    ),
    (
        "Einstellungen",
        "Die Daten können für einen Werktag, einen Samstag oder einen Sonntag angezeigt werden. \
         Außerdem lässt sich einstellen, ob auch Ziele angezeigt werden, die nur mit Umstieg \
         erreichbar sind.",
    ),
    (
        "Woher kommen die Daten?",
        "Ausgewertet wurden Fahrplandaten für NRW, die der Verein DELFI online zur Verfügung \
         stellt. Sie enthalten Nah- und Fernverkehr.",
    ),
    (
        "Wie kommt die Karte zustande?",
        "Die kürzesten Verbindungen wurden mit dem RAPTOR-Algorithmus berechnet, bei einer \
         maximalen Reisedauer von 60 Minuten. Fußwege zwischen Stationen werden dabei nicht \
         berücksichtigt, daher können nah beieinander liegende Haltestellen lange Reisezeiten \
         haben.",
    ),
    (
        "Ich habe einen Fehler gefunden!",
        "Schreiben Sie uns gerne eine Mail an newsroom-stories@wdr.de, dann prüfen wir das nach.",
    ),
];

const CONTACT: &[(&str, &str)] = &[(
    "",
    "Wenn Sie Fragen zum Reichweiten-Checker haben oder Fehler gefunden haben, freuen wir uns \
     über eine Mail an newsroom-stories@wdr.de. Weitere Kontaktmöglichkeiten zu den Redaktionen \
     des WDR finden Sie unter https://www1.wdr.de/kontakt/index.html",
)];
