use colored::Colorize;

use crate::input::keys::SHORTCUTS;

const FULL: &str = r##"scrolldeck deck format
======================

A deck is a YAML file. Paths are relative to the deck file. Unknown keys
are rejected so typos show up when the deck is loaded.

Top level
---------
  title:   Window title (optional)
  theme:   light | dark (optional)
  scroll:  smooth | instant (optional)
  assets:  Extra images to load during the loading screen (optional)
  slides:  List of slides (at least one)
  modals:  List of overlay panels (optional)

Slides
------
  - title:      Heading (required)
    subtitle:   Line under the heading
    body: |
      Paragraphs separated by a blank line.

      Like this one.
    background: images/cover.jpg
    accent:     "#5294E2"
    hotspots:
      - id:    hotspot-a          Unique across the deck
        label: Details            Text drawn inside the hotspot
        modal: modal-1            Panel to open when clicked
        rect:  [0.7, 0.6, 0.2, 0.15]
                                  x, y, width, height as fractions of the slide

Modals
------
  - id:    modal-1
    title: More details
    body:  Text shown inside the panel.

Several hotspots may open the same modal. A hotspot naming an unknown modal
does nothing when clicked; `scrolldeck check` warns about it. Panels close
with their close button, a click on the dimmed backdrop, or Esc.

Navigation
----------
Slides sit side by side on one horizontal strip. The buttons, the progress
dots, the timeline strip, the keyboard and horizontal swipes all move along
it; scrolling with a wheel or trackpad works too and snaps to the nearest
slide. The page counter pads numbers to two digits ("01 / 12"); set
`defaults.page_padding: double-digit` to pad only decks of ten or more.
"##;

fn print_shortcuts() {
    for (key, desc) in SHORTCUTS {
        println!("  {:<18} {}", key.cyan(), desc);
    }
}

pub fn run(short: bool) {
    if short {
        println!("{}", "scrolldeck quick reference".bold());
        println!();
        println!("{}", "Deck".bold());
        println!("  slides: [{{ title, subtitle, body, background, accent, hotspots }}]");
        println!("  hotspots: [{{ id, label, modal, rect: [x, y, w, h] }}]");
        println!("  modals: [{{ id, title, body }}]");
        println!();
        println!("{}", "Keys".bold());
        print_shortcuts();
        return;
    }
    print!("{FULL}");
    println!();
    println!("Keyboard");
    println!("--------");
    print_shortcuts();
}
