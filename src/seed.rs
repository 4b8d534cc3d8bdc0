//! Development data: wipes both tables and fills them with fake users and
//! recipes.

use std::collections::HashSet;

use anyhow::Context;
use rand::{seq::SliceRandom, Rng};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::repo_types::{NewUser, User},
    db::{PgStore, Store},
    recipes::{repo_types::NewRecipe, validate::MIN_INSTRUCTIONS_CHARS},
};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Bea", "Bruno", "Carmen", "Chen", "Dara", "Diego", "Elif", "Emeka",
    "Farah", "Felix", "Greta", "Hana", "Hugo", "Ines", "Ivan", "Jada", "Jonas", "Kai", "Keiko",
    "Lena", "Luca", "Maya", "Milo", "Nadia", "Nico", "Omar", "Olga", "Priya", "Quinn", "Rosa",
    "Sami", "Sofia", "Tariq", "Tess", "Uma", "Vera", "Wren", "Yara", "Zane",
];

const WORDS: &[&str] = &[
    "roasted", "garlic", "lemon", "herb", "chicken", "smoky", "tomato", "basil", "soup", "spicy",
    "ginger", "noodle", "bowl", "crispy", "potato", "salad", "honey", "glazed", "carrot", "creamy",
    "mushroom", "risotto", "sweet", "chili", "bean", "stew", "fresh", "mint", "yogurt", "sauce",
];

const STEPS: &[&str] = &[
    "Preheat the oven and line a tray with parchment.",
    "Chop the vegetables into even pieces so they cook at the same rate.",
    "Warm the oil in a heavy pan over medium heat.",
    "Season generously with salt and pepper.",
    "Stir in the spices and cook until fragrant.",
    "Add the stock and bring everything to a gentle simmer.",
    "Cover and let it cook until tender.",
    "Taste and adjust the seasoning before serving.",
    "Finish with fresh herbs and a squeeze of citrus.",
    "Rest for five minutes before slicing.",
];

const BIO_SENTENCES: &[&str] = &[
    "Home cook with a soft spot for slow braises.",
    "Bakes bread every weekend.",
    "Always hunting for the perfect weeknight dinner.",
    "Grew up in a kitchen full of spices.",
    "Believes every meal deserves a good sauce.",
    "Learning to cook one recipe at a time.",
    "Farmers market regular.",
];

pub async fn run(store: &PgStore, users: usize, recipes: usize) -> anyhow::Result<()> {
    anyhow::ensure!(
        users <= FIRST_NAMES.len(),
        "at most {} unique users can be seeded",
        FIRST_NAMES.len()
    );

    let (deleted_recipes, deleted_users) = store.clear_all().await?;
    info!(deleted_recipes, deleted_users, "deleted all records");

    let mut created: Vec<User> = Vec::with_capacity(users);
    let new_users = tokio::task::spawn_blocking(move || fake_users(users))
        .await
        .context("hash seed passwords task")??;
    for new in new_users {
        let user = store
            .create_user(new)
            .await
            .context("create seed user")?;
        created.push(user);
    }
    info!(count = created.len(), "created users");

    if created.is_empty() {
        return Ok(());
    }
    let owner_ids: Vec<Uuid> = created.iter().map(|u| u.id).collect();
    for new in fake_recipes(&owner_ids, recipes) {
        store
            .create_recipe(new)
            .await
            .context("create seed recipe")?;
    }
    info!(count = recipes, "created recipes");
    info!("seeding complete");
    Ok(())
}

/// Users with unique first-name usernames; password is `<username>password`.
fn fake_users(count: usize) -> anyhow::Result<Vec<NewUser>> {
    let mut rng = rand::thread_rng();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let Some(name) = FIRST_NAMES.choose(&mut rng) else {
            break;
        };
        if !seen.insert(*name) {
            continue;
        }
        let bio = BIO_SENTENCES
            .choose_multiple(&mut rng, 3)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let image_url = format!("https://picsum.photos/seed/{}/200/200", name.to_lowercase());
        let mut user = NewUser::new(name.to_string(), Some(bio), Some(image_url));
        user.set_password(&format!("{name}password"))?;
        out.push(user);
    }
    Ok(out)
}

fn fake_recipes(owners: &[Uuid], count: usize) -> Vec<NewRecipe> {
    let mut rng = rand::thread_rng();
    (0..count)
        .filter_map(|_| {
            let user_id = *owners.choose(&mut rng)?;
            Some(NewRecipe {
                id: Uuid::new_v4(),
                title: fake_title(&mut rng),
                instructions: fake_instructions(&mut rng),
                minutes_to_complete: Some(rng.gen_range(15..=90)),
                user_id,
            })
        })
        .collect()
}

fn fake_title(rng: &mut impl Rng) -> String {
    let mut title = WORDS
        .choose_multiple(rng, 4)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    title
}

fn fake_instructions(rng: &mut impl Rng) -> String {
    let mut text = STEPS
        .choose_multiple(rng, 8)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    while text.chars().count() < MIN_INSTRUCTIONS_CHARS {
        if let Some(step) = STEPS.choose(rng) {
            text.push(' ');
            text.push_str(step);
        }
    }
    text
}
