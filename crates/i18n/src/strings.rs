use crate::locale::Locale;

/// Every user-visible string of the map page, one table per locale.
///
/// Templates use `{name}` placeholders filled by [`fill`].
#[derive(Debug)]
pub struct Strings {
    // Map
    pub map_load_error: &'static str,
    pub visitors_label: &'static str,
    pub facing_label: &'static str,
    pub view_on_map: &'static str,
    pub add_to_cart: &'static str,
    pub remove_from_cart: &'static str,

    // Cart
    pub cart_empty: &'static str,
    pub remove_item: &'static str,
    pub reset_confirm: &'static str,

    // Notifications
    pub notify_added: &'static str,
    pub notify_removed: &'static str,
    pub notify_duplicate: &'static str,
    pub notify_cart_cleared: &'static str,
    pub notify_order_sent: &'static str,

    // Order
    pub order_summary_heading: &'static str,
    pub order_subject: &'static str,
    pub order_greeting: &'static str,
    pub order_contact_heading: &'static str,
    pub order_locations_heading: &'static str,
    pub order_closing: &'static str,
    pub field_company: &'static str,
    pub field_contact: &'static str,
    pub field_email: &'static str,
    pub field_phone: &'static str,
    pub field_duration: &'static str,
    pub field_message: &'static str,

    // Media kit
    pub pdf_error: &'static str,
    pub pdf_page_label: &'static str,
    pub pdf_previous: &'static str,
    pub pdf_next: &'static str,
}

pub static FR: Strings = Strings {
    map_load_error: "Impossible de charger la carte. Veuillez réessayer plus tard.",
    visitors_label: "Achalandage",
    facing_label: "Orienté vers",
    view_on_map: "Voir sur Google Maps",
    add_to_cart: "Ajouter au panier",
    remove_from_cart: "Retirer du panier",

    cart_empty: "Aucun emplacement sélectionné pour le moment.",
    remove_item: "Retirer",
    reset_confirm: "Voulez-vous vraiment vider votre panier?",

    notify_added: "{name} a été ajouté à votre panier",
    notify_removed: "{name} a été retiré de votre panier",
    notify_duplicate: "{name} est déjà dans votre panier",
    notify_cart_cleared: "Votre panier a été vidé",
    notify_order_sent: "Votre client de messagerie a été ouvert. Merci de votre demande!",

    order_summary_heading: "Emplacements sélectionnés",
    order_subject: "Demande de réservation publicitaire - {count} emplacement(s)",
    order_greeting: "Bonjour,\n\nJe souhaite obtenir une soumission pour les emplacements publicitaires suivants.",
    order_contact_heading: "Coordonnées :",
    order_locations_heading: "Emplacements sélectionnés ({count}) :",
    order_closing: "Merci!",
    field_company: "Entreprise",
    field_contact: "Personne-ressource",
    field_email: "Courriel",
    field_phone: "Téléphone",
    field_duration: "Durée de la campagne",
    field_message: "Message",

    pdf_error: "Impossible de charger la trousse média. Veuillez réessayer plus tard.",
    pdf_page_label: "Page {page} de {count}",
    pdf_previous: "Précédente",
    pdf_next: "Suivante",
};

pub static EN: Strings = Strings {
    map_load_error: "Unable to load the map. Please try again later.",
    visitors_label: "Traffic",
    facing_label: "Facing",
    view_on_map: "View on Google Maps",
    add_to_cart: "Add to cart",
    remove_from_cart: "Remove from cart",

    cart_empty: "No location selected yet.",
    remove_item: "Remove",
    reset_confirm: "Are you sure you want to clear your cart?",

    notify_added: "{name} was added to your cart",
    notify_removed: "{name} was removed from your cart",
    notify_duplicate: "{name} is already in your cart",
    notify_cart_cleared: "Your cart has been cleared",
    notify_order_sent: "Your email client has been opened. Thank you for your request!",

    order_summary_heading: "Selected locations",
    order_subject: "Advertising booking request - {count} location(s)",
    order_greeting: "Hello,\n\nI would like a quote for the following advertising locations.",
    order_contact_heading: "Contact details:",
    order_locations_heading: "Selected locations ({count}):",
    order_closing: "Thank you!",
    field_company: "Company",
    field_contact: "Contact person",
    field_email: "Email",
    field_phone: "Phone",
    field_duration: "Campaign duration",
    field_message: "Message",

    pdf_error: "Unable to load the media kit. Please try again later.",
    pdf_page_label: "Page {page} of {count}",
    pdf_previous: "Previous",
    pdf_next: "Next",
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::Fr => &FR,
        Locale::En => &EN,
    }
}

/// Replaces each `{key}` in `template` with its value. Unknown placeholders
/// are left as-is.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in args {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
