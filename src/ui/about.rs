/// The About page: static marketing copy for the house.
use iced::widget::{column, container, text};
use iced::{Element, Length};

const PARAGRAPHS: [&str; 4] = [
    "Borderless is not simply a stay. It is a space that invites you to \
     test your own boundaries, and to step past them.",
    "Like the structure itself, a round roof meeting square walls, \
     Borderless lets unfamiliar forms meet until the familiar frame gives \
     way to a new sense. Ambiguity becomes freedom, and freedom becomes a \
     new attempt.",
    "Here we ask: how far do your boundaries reach? Borderless permits \
     the unfamiliar. A moment paused before the nature outside the \
     window; a moment of freedom you could not have imagined in daily \
     life. This is a place that stirs the senses and softly crosses the \
     orders you know.",
    "The logo, completed by a rotation of triangles, carries the meaning \
     of boundlessness, expansion, extension: an ambiguity in which no \
     side is the reference. We chose a typeface that keeps a human warmth \
     rather than perfect polish; that imperfection is the message \
     Borderless delivers, and the experience it offers.",
];

pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    let body = PARAGRAPHS
        .iter()
        .fold(column![].spacing(24), |col, paragraph| {
            col.push(text(*paragraph).size(14))
        });

    container(body)
        .max_width(640)
        .width(Length::Fill)
        .padding([40, 0])
        .into()
}
