use chrono::{DateTime, Datelike, Utc};
use leptos::prelude::*;

use crate::portfolio;

use super::motion::use_section_motion;

fn copyright_year() -> i32 {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|built| built.year())
        .unwrap_or_else(|_| Utc::now().year())
}

#[component]
pub fn Contact(contact: &'static portfolio::Contact, owner: &'static str) -> impl IntoView {
    use_section_motion("contact");

    view! {
        <div class="pin-spacer">
            <section id="contact" class="min-h-[90vh] bg-[#111111] relative overflow-hidden z-[1]">
                <div
                    id="contact-backdrop"
                    class="motion absolute top-0 left-0 w-full text-[20vw] text-white opacity-[0.03] font-bold pointer-events-none [writing-mode:vertical-rl] z-0"
                >
                    "CONTACT"
                </div>
                <div class="relative min-h-screen flex items-center justify-center z-[2]">
                    <div
                        id="contact-content"
                        class="motion max-w-[1400px] w-full mx-auto px-4 sm:px-8 md:px-16 pt-20 lg:pt-32"
                    >
                        <div class="grid grid-cols-1 lg:grid-cols-2 gap-12 lg:gap-8">
                            <div>
                                <h3 class="text-sm font-medium text-[#666666] mb-4">"QUICK LINKS"</h3>
                                <div class="flex flex-wrap gap-2 text-sm">
                                    {contact
                                        .quick_links
                                        .iter()
                                        .enumerate()
                                        .map(|(index, link)| {
                                            view! {
                                                {(index != 0)
                                                    .then(|| view! { <span class="text-[#333333]">"—"</span> })}
                                                <a
                                                    href=link.href.as_str()
                                                    class="text-white hover:text-[#666666] transition-colors"
                                                >
                                                    {link.label.as_str()}
                                                </a>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                            <div class="space-y-6">
                                <h2 class="text-3xl sm:text-4xl lg:text-5xl xl:text-6xl text-white font-bold leading-tight">
                                    {contact.heading.as_str()}
                                    " ↓"
                                </h2>
                                <p class="text-[#666666] text-base sm:text-lg">{contact.blurb.as_str()}</p>
                                <a
                                    href=format!("mailto:{}", contact.email)
                                    class="text-white hover:text-[#666666] transition-colors inline-block text-base sm:text-lg"
                                >
                                    {contact.email.as_str()}
                                </a>
                            </div>
                        </div>
                        <div class="flex flex-col sm:flex-row justify-between items-start sm:items-center pt-8 border-t border-[#333333] mt-20">
                            <div class="flex flex-wrap gap-6 text-xs mb-4 sm:mb-0">
                                {contact
                                    .socials
                                    .iter()
                                    .map(|link| {
                                        view! {
                                            <a
                                                href=link.href.as_str()
                                                target="_blank"
                                                rel="noopener noreferrer"
                                                class="text-[#666666] hover:text-white transition-colors"
                                            >
                                                {link.label.as_str()}
                                            </a>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <div class="text-xs text-[#666666]">
                                {format!("© {} {owner}. All rights reserved.", copyright_year())}
                            </div>
                        </div>
                    </div>
                </div>
            </section>
        </div>
    }
}
