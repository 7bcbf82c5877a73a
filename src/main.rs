use borderless::app::Borderless;

fn main() -> iced::Result {
    iced::application(
        "House of Borderless",
        Borderless::update,
        Borderless::view,
    )
    .theme(Borderless::theme)
    .subscription(Borderless::subscription)
    .centered()
    .run_with(Borderless::new)
}
