use leptos::prelude::*;
use leptos_meta::Title;

use crate::portfolio::portfolio;

use super::about::About;
use super::contact::Contact;
use super::excellence::Excellence;
use super::experience::Experience;
use super::hero::Hero;
use super::learning::Learning;
use super::navigation::Navigation;
use super::philosophy::Philosophy;
use super::projects::Projects;
use super::skills::Skills;

#[component]
pub fn HomePage() -> impl IntoView {
    let content = match portfolio() {
        Ok(content) => content,
        Err(e) => {
            log::error!("couldn't load portfolio: {e}");
            return view! {
                <Title text="Portfolio" />
                <p class="min-h-screen flex items-center justify-center text-[#888888]">
                    "This page couldn't be loaded."
                </p>
            }
            .into_any();
        }
    };
    let owner = content.owner.as_str();

    view! {
        <Title text=owner />
        <Navigation owner />
        <Hero hero=&content.hero owner />
        <About lines=&content.about />
        <Experience experience=&content.experience />
        <Philosophy paragraphs=&content.philosophy />
        <Excellence word=content.excellence.as_str() />
        <Skills skills=&content.skills />
        <Learning paragraphs=&content.learning />
        <Projects projects=&content.projects />
        <Contact contact=&content.contact owner />
    }
    .into_any()
}
