//! Built-in catalog data

use std::collections::HashMap;

use super::{Catalog, CatalogItem, Color};

/// (id, name, name_key, image_url, description)
type ItemRow = (&'static str, &'static str, &'static str, &'static str, &'static str);

/// (id, name, name_key, hex)
type ColorRow = (&'static str, &'static str, &'static str, &'static str);

const ROOMS: &[ItemRow] = &[
    (
        "gaming-room",
        "Gaming Room",
        "gamingRoom",
        "https://images.unsplash.com/photo-1616588589676-62b3bd4d2e84?w=400&h=400&fit=crop",
        "modern gaming room with RGB lighting",
    ),
    (
        "bedroom",
        "Bedroom",
        "bedroom",
        "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af?w=400&h=400&fit=crop",
        "cozy and serene bedroom",
    ),
    (
        "living-room",
        "Living Room",
        "livingRoom",
        "https://images.unsplash.com/photo-1615873968403-89e068629265?w=400&h=400&fit=crop",
        "spacious, minimalist living room",
    ),
    (
        "home-office",
        "Home Office",
        "homeOffice",
        "https://images.unsplash.com/photo-1554224155-1696413565d3?w=400&h=400&fit=crop",
        "productive and clean home office",
    ),
    (
        "kitchen",
        "Kitchen",
        "kitchen",
        "https://images.unsplash.com/photo-1604342416049-1d37a25902c6?w=400&h=400&fit=crop",
        "a modern, bright kitchen with an island",
    ),
    (
        "kids-room",
        "Kids Room",
        "kidsRoom",
        "https://images.unsplash.com/photo-1596431713294-8924c4c57fb7?w=400&h=400&fit=crop",
        "a fun and colorful kids room",
    ),
    (
        "bathroom",
        "Bathroom",
        "bathroom",
        "https://images.unsplash.com/photo-1582914101152-16782762a42a?w=400&h=400&fit=crop",
        "a modern and clean bathroom",
    ),
];

const FURNITURE: &[ItemRow] = &[
    (
        "gaming-chair",
        "Gaming Chair",
        "gamingChair",
        "https://images.unsplash.com/photo-1619420574218-758237c1514a?w=400&h=400&fit=crop",
        "an ergonomic leather gaming chair",
    ),
    (
        "l-shaped-desk",
        "L-Shaped Desk",
        "lShapedDesk",
        "https://images.unsplash.com/photo-1611095789689-54d5c07c427c?w=400&h=400&fit=crop",
        "a large L-shaped wooden desk",
    ),
    (
        "modern-sofa",
        "Modern Sofa",
        "modernSofa",
        "https://images.unsplash.com/photo-1493663284031-b7e33ef2d92a?w=400&h=400&fit=crop",
        "a sleek, modern gray sofa",
    ),
    (
        "queen-bed",
        "Queen Bed",
        "queenBed",
        "https://images.unsplash.com/photo-1595526114035-0d45ed16da31?w=400&h=400&fit=crop",
        "a queen-sized bed with a tufted headboard",
    ),
    (
        "bookshelf",
        "Bookshelf",
        "bookshelf",
        "https://images.unsplash.com/photo-1555041469-a586c61ea9bc?w=400&h=400&fit=crop",
        "a tall, industrial-style bookshelf",
    ),
    (
        "coffee-table",
        "Coffee Table",
        "coffeeTable",
        "https://images.unsplash.com/photo-1530037782043-c6d98a1832d2?w=400&h=400&fit=crop",
        "a rustic wooden coffee table",
    ),
];

const DECOR: &[ItemRow] = &[
    (
        "neon-sign",
        "Neon Sign",
        "neonSign",
        "https://images.unsplash.com/photo-1549488344-cbb6c34cf08b?w=400&h=400&fit=crop",
        "a custom neon sign on the wall",
    ),
    (
        "potted-plant",
        "Potted Plant",
        "pottedPlant",
        "https://images.unsplash.com/photo-1485955900006-10f4d324d411?w=400&h=400&fit=crop",
        "a large potted monstera plant in a corner",
    ),
    (
        "rgb-strips",
        "RGB Strips",
        "rgbStrips",
        "https://images.unsplash.com/photo-1632599793131-69a4735232a2?w=400&h=400&fit=crop",
        "RGB LED light strips for ambient lighting",
    ),
    (
        "gallery-wall",
        "Gallery Wall",
        "galleryWall",
        "https://images.unsplash.com/photo-1513689124293-6234f4b1e563?w=400&h=400&fit=crop",
        "a gallery wall with assorted art prints",
    ),
    (
        "area-rug",
        "Area Rug",
        "areaRug",
        "https://images.unsplash.com/photo-1617301828142-25e2a22c1451?w=400&h=400&fit=crop",
        "a geometric pattern area rug",
    ),
    (
        "throw-pillows",
        "Throw Pillows",
        "throwPillows",
        "https://images.unsplash.com/photo-1617301828014-a4b5d5d85c5b?w=400&h=400&fit=crop",
        "a set of colorful throw pillows",
    ),
];

const COLORS: &[ColorRow] = &[
    ("slate-blue", "Slate Blue", "slateBlue", "#4A5568"),
    ("forest-green", "Forest Green", "forestGreen", "#2F855A"),
    ("warm-beige", "Warm Beige", "warmBeige", "#F7FAFC"),
    ("terracotta", "Terracotta", "terracotta", "#DD6B20"),
    ("charcoal-gray", "Charcoal Gray", "charcoalGray", "#2D3748"),
    ("dusty-rose", "Dusty Rose", "dustyRose", "#F56565"),
    ("deep-purple", "Deep Purple", "deepPurple", "#5B21B6"),
    ("electric-lime", "Electric Lime", "electricLime", "#A3E635"),
    ("sky-blue", "Sky Blue", "skyBlue", "#3B82F6"),
    ("lavender", "Lavender", "lavender", "#A78BFA"),
    ("olive-green", "Olive Green", "oliveGreen", "#4D7C0F"),
    ("cream", "Cream", "cream", "#FEFCE8"),
    ("mustard-yellow", "Mustard Yellow", "mustardYellow", "#D97706"),
    ("beige", "Beige", "beige", "#F5F5DC"),
    ("light-gray", "Light Gray", "lightGray", "#D1D5DB"),
    ("warm-brown", "Warm Brown", "warmBrown", "#8C5A3B"),
    ("caramel", "Caramel", "caramel", "#C68E17"),
    ("blue-gray", "Blue-Gray", "blueGray", "#778899"),
    ("pastel-blue", "Pastel Blue", "pastelBlue", "#A7C7E7"),
    ("dark-blue", "Dark Blue", "darkBlue", "#00008B"),
    ("soft-pink", "Soft Pink", "softPink", "#F8C8DC"),
    ("white", "White", "white", "#FFFFFF"),
    ("apricot", "Apricot", "apricot", "#FBCEB1"),
    ("light-yellow", "Light Yellow", "lightYellow", "#FFFACD"),
    ("cream-brown", "Cream Brown", "creamBrown", "#B5A691"),
    ("green-blue", "Green-Blue", "greenBlue", "#2F9C95"),
    ("graphite", "Graphite", "graphite", "#525252"),
];

const RECOMMENDATIONS: &[(&str, &[&str])] = &[
    ("gaming-room", &["charcoal-gray", "slate-blue", "deep-purple", "electric-lime", "dusty-rose"]),
    ("living-room", &["beige", "light-gray", "olive-green", "warm-brown", "caramel", "blue-gray"]),
    ("bedroom", &["pastel-blue", "dark-blue", "soft-pink", "lavender", "light-gray", "cream"]),
    ("kitchen", &["white", "olive-green", "apricot", "light-yellow", "cream-brown", "green-blue"]),
    ("kids-room", &["sky-blue", "soft-pink", "electric-lime", "terracotta", "light-yellow", "white"]),
    ("home-office", &["light-gray", "slate-blue", "forest-green", "white", "graphite"]),
    ("bathroom", &["white", "sky-blue", "light-gray", "green-blue", "beige"]),
];

fn items(rows: &[ItemRow]) -> Vec<CatalogItem> {
    rows.iter()
        .map(|&(id, name, name_key, image_url, description)| CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            name_key: name_key.to_string(),
            image_url: image_url.to_string(),
            description: description.to_string(),
        })
        .collect()
}

pub(super) fn catalog() -> Catalog {
    let colors = COLORS
        .iter()
        .map(|&(id, name, name_key, hex)| Color {
            id: id.to_string(),
            name: name.to_string(),
            name_key: name_key.to_string(),
            hex: hex.to_string(),
        })
        .collect();

    let recommendations: HashMap<String, Vec<String>> = RECOMMENDATIONS
        .iter()
        .map(|(room, ids)| {
            (
                room.to_string(),
                ids.iter().map(|id| id.to_string()).collect(),
            )
        })
        .collect();

    Catalog::new(
        items(ROOMS),
        colors,
        items(FURNITURE),
        items(DECOR),
        recommendations,
    )
}
