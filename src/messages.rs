//! Every user-facing line the router speaks on its own behalf.

use crate::lang::{Lang, Localized};

pub fn not_understood() -> Localized {
    Localized::new(
        "Sorry, I don't recognize that command yet.",
        "माफ़ कीजिए, मैं अभी यह कमांड नहीं समझती।",
        "Désolée, je ne reconnais pas encore cette commande.",
        "Lo siento, todavía no reconozco ese comando.",
        "Entschuldigung, diesen Befehl kenne ich noch nicht.",
    )
}

pub fn handler_failed() -> Localized {
    Localized::new(
        "Sorry, something went wrong while doing that.",
        "माफ़ कीजिए, यह करते समय कुछ गड़बड़ हो गई।",
        "Désolée, un problème est survenu.",
        "Lo siento, algo salió mal al hacerlo.",
        "Entschuldigung, dabei ist etwas schiefgelaufen.",
    )
}

pub fn no_reply() -> Localized {
    Localized::new(
        "I couldn't get that.",
        "मैं समझ नहीं पाई।",
        "Je n'ai pas compris.",
        "No pude entenderlo.",
        "Das habe ich nicht verstanden.",
    )
}

pub fn cancelled() -> Localized {
    Localized::new(
        "Okay, cancelled.",
        "ठीक है, रद्द कर दिया।",
        "D'accord, annulé.",
        "Vale, cancelado.",
        "Okay, abgebrochen.",
    )
}

pub fn did_you_mean(candidate: &str) -> Localized {
    Localized::new(
        format!("Did you mean '{candidate}'?"),
        format!("क्या आपका मतलब '{candidate}' था?"),
        format!("Vouliez-vous dire « {candidate} » ?"),
        format!("¿Quisiste decir '{candidate}'?"),
        format!("Meinten Sie „{candidate}“?"),
    )
}

pub fn which_city() -> Localized {
    Localized::new(
        "Which city should I check?",
        "किस शहर का मौसम देखूँ?",
        "Quelle ville dois-je vérifier ?",
        "¿Qué ciudad debo consultar?",
        "Welche Stadt soll ich prüfen?",
    )
}

pub fn weather_for(city: &str) -> Localized {
    Localized::new(
        format!("Checking the weather in {city}."),
        format!("{city} का मौसम देख रही हूँ।"),
        format!("Je regarde la météo à {city}."),
        format!("Consultando el clima en {city}."),
        format!("Ich prüfe das Wetter in {city}."),
    )
}

pub fn which_language() -> Localized {
    Localized::new(
        "Which language would you like?",
        "आप कौन सी भाषा चाहते हैं?",
        "Quelle langue voulez-vous ?",
        "¿Qué idioma prefieres?",
        "Welche Sprache möchten Sie?",
    )
}

pub fn language_already(lang: Lang) -> Localized {
    Localized::new(
        format!("I'm already speaking {}.", lang.display_name(Lang::En)),
        format!("मैं पहले से {} में बोल रही हूँ।", lang.display_name(Lang::Hi)),
        format!("Je parle déjà {}.", lang.display_name(Lang::Fr)),
        format!("Ya estoy hablando {}.", lang.display_name(Lang::Es)),
        format!("Ich spreche bereits {}.", lang.display_name(Lang::De)),
    )
}

pub fn language_changed(lang: Lang) -> Localized {
    Localized::new(
        format!("Language changed to {}.", lang.display_name(Lang::En)),
        format!("भाषा {} में बदल दी गई।", lang.display_name(Lang::Hi)),
        format!("Langue changée en {}.", lang.display_name(Lang::Fr)),
        format!("Idioma cambiado a {}.", lang.display_name(Lang::Es)),
        format!("Sprache auf {} umgestellt.", lang.display_name(Lang::De)),
    )
}

pub fn wake_on() -> Localized {
    Localized::new(
        "Wake mode enabled.",
        "वेक मोड चालू कर दिया।",
        "Mode réveil activé.",
        "Modo de activación encendido.",
        "Wachmodus aktiviert.",
    )
}

pub fn wake_off() -> Localized {
    Localized::new(
        "Wake mode disabled.",
        "वेक मोड बंद कर दिया।",
        "Mode réveil désactivé.",
        "Modo de activación apagado.",
        "Wachmodus deaktiviert.",
    )
}

pub fn plotting_last_equation(equation: &str) -> Localized {
    Localized::new(
        format!("Plotting {equation}."),
        format!("{equation} का ग्राफ बना रही हूँ।"),
        format!("Je trace {equation}."),
        format!("Graficando {equation}."),
        format!("Ich zeichne {equation}."),
    )
}

pub fn physics_noted() -> Localized {
    Localized::new(
        "Physics problem noted. Say 'plot it' to see the graph.",
        "भौतिकी प्रश्न दर्ज हुआ। ग्राफ देखने के लिए 'ग्राफ दिखाओ' कहें।",
        "Problème de physique noté. Dites « trace le graphique » pour le voir.",
        "Problema de física anotado. Di 'traza el gráfico' para verlo.",
        "Physikaufgabe notiert. Sagen Sie „zeichne den graph“ für das Diagramm.",
    )
}

/// Generic acknowledgement used by handlers that only confirm routing.
pub fn acknowledged(intent: &str) -> Localized {
    let intent = intent.replace('_', " ");
    Localized::new(
        format!("Okay: {intent}."),
        format!("ठीक है: {intent}।"),
        format!("D'accord : {intent}."),
        format!("Vale: {intent}."),
        format!("Okay: {intent}."),
    )
}

/// Title for message boxes shown next to spoken lines.
pub const TITLE: &str = "Nova";
