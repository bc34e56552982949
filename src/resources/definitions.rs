use super::{
    ChildCollection, ChildKind, Field, FileSlot, ListOrder, Messages, ResourceSchema,
};

const UNCATEGORIZED: &str = "Uncategorized";

pub static GALLERY: ResourceSchema = ResourceSchema {
    key: "gallery",
    table: "gallery",
    label: "Image",
    fields: &[
        Field::optional("title"),
        Field::with_default("category", UNCATEGORIZED),
    ],
    files: &[FileSlot {
        input: "file",
        column: "filepath",
        type_tag: "gallery",
        url_key: "url",
        required: true,
        name_column: Some("filename"),
        size_column: Some("size"),
    }],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Image uploaded successfully",
        updated: "Image updated successfully",
        deleted: "Image deleted successfully",
    },
    categories: &[
        "Uncategorized",
        "Nature",
        "Travel",
        "Food",
        "People",
        "Architecture",
        "Uncategorized Research",
        "National",
        "International",
    ],
};

const EVENT_FIELDS: &[Field] = &[
    Field::required("title"),
    Field::required("date"),
    Field::required("category"),
    Field::required("description"),
];

const THUMBNAIL: &[FileSlot] = &[FileSlot::new("image", "image", "thumbnail", "url", true)];

pub static EVENTS: ResourceSchema = ResourceSchema {
    key: "events",
    table: "events",
    label: "Event",
    fields: EVENT_FIELDS,
    files: THUMBNAIL,
    children: &[
        ChildCollection {
            key: "tags",
            table: "event_tags",
            parent_column: "event_id",
            value_column: "tag",
            kind: ChildKind::Text,
        },
        ChildCollection {
            key: "gallery",
            table: "event_gallery",
            parent_column: "event_id",
            value_column: "image_url",
            kind: ChildKind::Image { type_tag: "gallery" },
        },
    ],
    order: ListOrder::Insertion,
    messages: Messages {
        created: "Event created successfully",
        updated: "Event updated successfully",
        deleted: "Event deleted successfully",
    },
    categories: &[
        "Events",
        "Industry Lectures",
        "Industry Visits",
        "Corporate Connect",
    ],
};

pub static CLUBS: ResourceSchema = ResourceSchema {
    key: "clubs",
    table: "clubs",
    label: "Club",
    fields: EVENT_FIELDS,
    files: THUMBNAIL,
    children: &[
        ChildCollection {
            key: "tags",
            table: "club_tags",
            parent_column: "club_id",
            value_column: "tag",
            kind: ChildKind::Text,
        },
        ChildCollection {
            key: "gallery",
            table: "club_gallery",
            parent_column: "club_id",
            value_column: "image_url",
            kind: ChildKind::Image { type_tag: "gallery" },
        },
    ],
    order: ListOrder::Insertion,
    messages: Messages {
        created: "Club created successfully",
        updated: "Club updated successfully",
        deleted: "Club deleted successfully",
    },
    categories: &[
        "All Clubs",
        "IT Club",
        "Maestros Club",
        "Finance Club",
        "HR Club",
        "Operations Club",
        "E-Cell Club",
        "Soft Skills Club",
        "Global Voices Club",
        "Research Club",
        "Sports Club",
    ],
};

pub static FACULTY: ResourceSchema = ResourceSchema {
    key: "faculty",
    table: "faculty",
    label: "Faculty member",
    fields: &[
        Field::required("title"),
        Field::with_default("category", UNCATEGORIZED),
        Field::optional("description"),
        Field::optional("link"),
    ],
    files: &[FileSlot::new("file", "file_name", "faculty", "url", true)],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Faculty added successfully",
        updated: "Faculty updated successfully",
        deleted: "Faculty member deleted successfully",
    },
    categories: &[UNCATEGORIZED],
};

pub static PLACEMENT: ResourceSchema = ResourceSchema {
    key: "placement",
    table: "placement",
    label: "Placement data",
    fields: &[
        Field::required("title"),
        Field::optional("year"),
        Field::with_default("category", UNCATEGORIZED),
        Field::optional("description"),
        Field::optional("link"),
    ],
    files: &[
        FileSlot::new("file", "file_name", "placement", "url", true),
        FileSlot::new("logo_file", "logo_file", "logo", "logo_url", false),
    ],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Placement data uploaded successfully",
        updated: "Placement data updated successfully",
        deleted: "Placement data deleted successfully",
    },
    categories: &[
        "Uncategorized",
        "Summer Placement",
        "Dazzling Divas",
        "Hall of Fame",
    ],
};

pub static RECRUITERS: ResourceSchema = ResourceSchema {
    key: "recruiters",
    table: "recruiters",
    label: "Recruiter",
    fields: &[
        Field::required("title"),
        Field::with_default("category", UNCATEGORIZED),
        Field::optional("description"),
    ],
    files: &[FileSlot::new("file", "file_name", "recruiter", "url", true)],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Recruiter added successfully",
        updated: "Recruiter updated successfully",
        deleted: "Recruiter deleted successfully",
    },
    categories: &[
        "Uncategorized",
        "Final Placement Recruiter",
        "Summer Internship Recruiter",
    ],
};

pub static TESTIMONIALS: ResourceSchema = ResourceSchema {
    key: "testimonials",
    table: "testimonials",
    label: "Testimonial",
    fields: &[
        Field::required("name"),
        Field::optional("position"),
        Field::required("testimonial"),
        Field::optional("link"),
    ],
    files: &[FileSlot::new("file", "file_name", "testimonial", "url", true)],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Testimonial uploaded successfully",
        updated: "Testimonial updated successfully",
        deleted: "Testimonial deleted successfully",
    },
    categories: &[],
};

pub static BANNERS: ResourceSchema = ResourceSchema {
    key: "banners",
    table: "banners",
    label: "Banner",
    fields: &[
        Field::optional("title"),
        Field::with_default("category", UNCATEGORIZED),
    ],
    files: &[FileSlot::new("file", "file_name", "banner", "url", true)],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Banner uploaded successfully",
        updated: "Banner updated successfully",
        deleted: "Banner deleted successfully",
    },
    categories: &[
        "Uncategorized",
        "Slider1",
        "Slider2",
        "Slider3",
        "Slider4",
        "Slider5",
        "IMM Legacy",
        "Leadership",
        "Advisory Board",
        "Accreditations & Awards",
        "IMM Partners",
        "PGDM",
        "BBA",
        "Admissions",
        "Industry Lectures & Webinars",
        "Industry Visits",
        "Corporate Events",
        "Recruit and Partner",
        "Faculty",
        "Research",
        "Events & Activities",
        "Clubs at IMM",
        "State-of-the Art Campus",
        "Campus Recruitment",
        "Placement Records",
        "Dazzling Divas",
        "Hall of Fame",
        "Alumni Connect",
        "Career",
        "Contact Us",
    ],
};

pub static EDU_TOURS: ResourceSchema = ResourceSchema {
    key: "edutour",
    table: "edu_tours",
    label: "Tour",
    fields: &[
        Field::required("title"),
        Field::with_default("category", UNCATEGORIZED),
        Field::optional("subcategory"),
        Field::optional("description"),
    ],
    files: &[FileSlot::new("file", "file_name", "edutour", "url", true)],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Tour uploaded successfully",
        updated: "Tour updated successfully",
        deleted: "Tour deleted successfully",
    },
    categories: &["Uncategorized", "International", "National"],
};

pub static RECRUIT_AND_PARTNER: ResourceSchema = ResourceSchema {
    key: "recruit-and-partner",
    table: "recruit_and_partner",
    label: "Submission",
    fields: &[
        Field::sanitized("fullName", true),
        Field::sanitized("email", true),
        Field::sanitized("title", false),
        Field::sanitized("company", false),
        Field::sanitized("connectionType", true),
        Field::sanitized("comments", false),
    ],
    files: &[],
    children: &[],
    order: ListOrder::NewestFirst,
    messages: Messages {
        created: "Submission created successfully.",
        updated: "Submission updated successfully.",
        deleted: "Submission deleted successfully.",
    },
    categories: &[],
};
