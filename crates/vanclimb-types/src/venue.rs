//! Venue content rendered on the landing page.
//!
//! Everything here is presentational copy. The defaults describe Van
//! Climb in Mount Pleasant, Vancouver; the `venue` section of the site
//! configuration can override any field.

use serde::{Deserialize, Serialize};

/// A pass or membership offered at the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Tier name ("Drop-In", "Monthly", ...).
    pub name: String,
    /// Display price including the currency sign.
    pub price: String,
    /// Bullet points listed under the price.
    pub perks: Vec<String>,
    /// Call-to-action button text.
    pub cta: String,
    /// Whether the tier is visually highlighted.
    #[serde(default)]
    pub featured: bool,
    /// Small caption under the price of a featured tier.
    #[serde(default)]
    pub highlight: Option<String>,
}

/// One step of the first-timer onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstTimerStep {
    /// Heading, including its ordinal ("1. Waiver").
    pub title: String,
    /// Paragraph of body copy.
    pub body: String,
    /// Footnote shown under the body.
    pub note: String,
    /// When set, the footnote is rendered as a link to this section id.
    #[serde(default)]
    pub link_section: Option<String>,
}

/// All content the landing page needs about the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    /// Brand mark in the nav bar.
    pub name: String,
    /// Name used in running text ("Visit Van Climb").
    pub display_name: String,
    /// Single-letter logo mark.
    pub logo_mark: String,
    /// City and province, for the footer.
    pub city: String,
    /// Disciplines badge above the headline.
    pub disciplines: String,
    /// Hero headline.
    pub headline: String,
    /// Hero sub-heading.
    pub tagline: String,
    /// Hero imagery (main, inset top-right, inset bottom-left).
    pub hero_images: Vec<HeroImage>,
    /// Known busy windows listed beside the meter.
    pub peak_times: Vec<String>,
    /// Etiquette tip under the peak times.
    pub crowd_tip: String,
    /// First-timer steps in order.
    pub first_timer_steps: Vec<FirstTimerStep>,
    /// Pricing tiers in display order.
    pub pricing: Vec<PricingTier>,
    /// Opening hours, one line per range of days.
    pub hours: Vec<String>,
    /// Street address.
    pub address: String,
    /// Free-text query handed to the mapping service.
    pub map_query: String,
    /// Base URL of the mapping service.
    pub map_base_url: String,
    /// Photo on the visit card.
    pub visit_image: HeroImage,
    /// Caption over the visit photo.
    pub community_note: String,
}

/// An image with its alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    /// Image URL.
    pub src: String,
    /// Alternative text.
    pub alt: String,
}

impl Venue {
    /// Directions link: the mapping service with the neighbourhood query.
    ///
    /// Spaces in the query become `+`, and anything else outside the
    /// unreserved set is percent-encoded.
    pub fn directions_url(&self) -> String {
        let mut url = self.map_base_url.clone();
        url.push_str("?q=");
        for byte in self.map_query.bytes() {
            match byte {
                b' ' => url.push('+'),
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    url.push(char::from(byte));
                }
                other => url.push_str(&format!("%{other:02X}")),
            }
        }
        url
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn image(src: &str, alt: &str) -> HeroImage {
    HeroImage {
        src: src.to_owned(),
        alt: alt.to_owned(),
    }
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            name: "VAN CLIMB".to_owned(),
            logo_mark: "V".to_owned(),
            display_name: "Van Climb".to_owned(),
            city: "Vancouver BC".to_owned(),
            disciplines: "Top-rope \u{2022} Lead \u{2022} Bouldering \u{2022} Training".to_owned(),
            headline: "Climb bold. Chalk up. Vancouver\u{2019}s vertical playground.".to_owned(),
            tagline: "World-class routes, fresh sets weekly, and community at the core. \
                      Drop in or start your climbing journey today."
                .to_owned(),
            hero_images: vec![
                image(
                    "https://images.unsplash.com/photo-1541397200919-0b05a7f57813?q=80&w=2069&auto=format&fit=crop",
                    "Climber making a dynamic move on an overhang",
                ),
                image(
                    "https://images.unsplash.com/photo-1517957754645-708b2e2d6bc3?q=80&w=1976&auto=format&fit=crop",
                    "Bouldering action",
                ),
                image(
                    "https://images.unsplash.com/photo-1540917124281-342587941389?q=80&w=2069&auto=format&fit=crop",
                    "Lead climbing action",
                ),
            ],
            peak_times: strings(&[
                "Weekdays: 5\u{2013}8 PM",
                "Weekends: 11 AM\u{2013}3 PM",
                "Best time for bouldering: After 8 PM",
                "Best time for ropes: 10 AM\u{2013}4 PM",
            ]),
            crowd_tip: "Tip: Bring a brush\u{2014}chalk up and brush holds after your send \
                        for that shared send energy."
                .to_owned(),
            first_timer_steps: vec![
                FirstTimerStep {
                    title: "1. Waiver".to_owned(),
                    body: "Complete your digital waiver before you arrive. It saves time \
                           and gets you on the wall faster."
                        .to_owned(),
                    note: "Fill out waiver".to_owned(),
                    link_section: Some("visit".to_owned()),
                },
                FirstTimerStep {
                    title: "2. Intro Class".to_owned(),
                    body: "New to climbing? Our 30-minute bouldering intro covers safety, \
                           falling, and gym etiquette. No experience needed."
                        .to_owned(),
                    note: "Daily at 12 PM, 5 PM, 7 PM".to_owned(),
                    link_section: None,
                },
                FirstTimerStep {
                    title: "3. Gear".to_owned(),
                    body: "We\u{2019}ve got rentals: shoes, chalk, and harnesses. Wear comfy \
                           clothes. Chalk up and you\u{2019}re set."
                        .to_owned(),
                    note: "Rental bundle: $10".to_owned(),
                    link_section: None,
                },
            ],
            pricing: vec![
                PricingTier {
                    name: "Drop-In".to_owned(),
                    price: "$22".to_owned(),
                    perks: strings(&["All-day access", "Includes re-entry", "Gear rental +$10"]),
                    cta: "Buy pass".to_owned(),
                    featured: false,
                    highlight: None,
                },
                PricingTier {
                    name: "Monthly".to_owned(),
                    price: "$79".to_owned(),
                    perks: strings(&[
                        "Unlimited climbs",
                        "Member nights + discounts",
                        "Freeze anytime",
                    ]),
                    cta: "Join now".to_owned(),
                    featured: true,
                    highlight: Some("Best value".to_owned()),
                },
                PricingTier {
                    name: "10-Visit".to_owned(),
                    price: "$180".to_owned(),
                    perks: strings(&["Shareable", "Valid 12 months", "Transferable"]),
                    cta: "Get pack".to_owned(),
                    featured: false,
                    highlight: None,
                },
            ],
            hours: strings(&[
                "Mon\u{2013}Fri: 6 AM\u{2013}11 PM",
                "Sat\u{2013}Sun: 8 AM\u{2013}10 PM",
            ]),
            address: "123 Chalk Line, Mount Pleasant, Vancouver, BC".to_owned(),
            map_query: "Mount Pleasant Vancouver".to_owned(),
            map_base_url: "https://maps.google.com/".to_owned(),
            visit_image: image(
                "https://images.unsplash.com/photo-1615212049275-7b9a1cad02ee?q=80&w=2069&auto=format&fit=crop",
                "Chalky hands clapping before a climb",
            ),
            community_note: "Community nights every Thursday \u{2022} New sets weekly".to_owned(),
        }
    }
}
