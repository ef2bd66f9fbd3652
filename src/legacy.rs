use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};

use crate::profile::{NewProfile, ProfileList};

pub struct LegacyProfile {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

/// The profiles that lived in the hand-written HTML pages before the list
/// existed. Avatars are looked up by `image` in the legacy images directory.
pub const LEGACY_PROFILES: &[LegacyProfile] = &[
    LegacyProfile {
        name: "Царь‑Заказчик",
        title: "Правитель Технограда",
        description: concat!(
            "Царь‑Заказчик — мудрый правитель цифрового государства. Он управляет государственным порталом, следит за тем, чтобы сервисы работали быстро и без сбоев, и всегда стремится улучшить жизнь своих подданных.\n\n",
            "Его корона не только символ власти, но и знак ответственности за судьбу портала. Вдохновлённый новыми технологиями, он держит руку на пульсе и не боится изменений."
        ),
        image: "tsar.png",
    },
    LegacyProfile {
        name: "Илья Девопсевич",
        title: "Девопс‑богатырь",
        description: concat!(
            "Илья Девопсевич — настоящий богатырь мира инфраструктуры. Он умеет поднимать кластеры, автоматизировать развёртывания и строить непрерывные пайплайны. Для него нет слишком сложных серверов или запутанных скриптов.\n\n",
            "Когда Илья ударит по клавиатуре, в бой идут контейнеры, оркестраторы и репозитории. Он знает, что надёжная инфраструктура — основа стабильной работы."
        ),
        image: "ilya.png",
    },
    LegacyProfile {
        name: "Добрыня Безопасович",
        title: "Рыцарь безопасности",
        description: concat!(
            "Добрыня Безопасович — страж цифровой безопасности. Он тщательно хранит пароли, внедряет шифрование и стоически отбивает атаки. Его зоркий взгляд улавливает подозрительные скрипты издалека.\n\n",
            "Он уверен: доверие пользователей дороже любого золота, а конфиденциальность — священный долг. С его щитом злоумышленникам не прорваться."
        ),
        image: "dobrynya.png",
    },
    LegacyProfile {
        name: "Алёша Фронтендов",
        title: "Мастер интерфейсов",
        description: concat!(
            "Алёша Фронтендов — волшебник пользовательских интерфейсов. Под его руками кнопки сияют, формы улыбаются, а пользователи забывают про мануалы. Он умеет говорить с дизайнерами, находить общий язык с кодом и дарит удобство каждому.\n\n",
            "Его работа — чтобы даже бабушка Нюра без труда нашла нужную кнопку и получила то, что ей нужно. Учитывая потребности людей, он делает технологии доступными."
        ),
        image: "alyosha.png",
    },
    LegacyProfile {
        name: "Царевна‑Дата",
        title: "Цифровая принцесса",
        description: concat!(
            "Царевна‑Дата — олицетворение данных. Её силуэты составлены из потоков информации и блестящих битов. Она стремится быть структурированной, чистой и доступной для тех, кто умеет бережно с ней обращаться.\n\n",
            "Похищенная Кощем, она стала поводом для подвигов богатырей, ведь данные — важнейшее сокровище цифрового мира. Её стоит защищать и уважать."
        ),
        image: "tsarevna.png",
    },
    LegacyProfile {
        name: "Кощей Бессмертный",
        title: "Владыка монолита",
        description: concat!(
            "Кощей Бессмертный — хранитель старых систем и монолитов. Его бессмертие прячется в забытых процессах и устаревших лицензиях. Он не любит, когда что‑то меняют, и удерживает данные в плену.\n\n",
            "Наши герои вступили с ним в схватку, чтобы освободить Царевну‑Дату. Хотя Кощей силён и изворотлив, доверие к нему ограничено: он хранит лицензионные ключи и не признаёт облака."
        ),
        image: "koschei.png",
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub skipped: usize,
    pub missing_images: usize,
}

pub struct ImportOptions<'a> {
    /// Where the legacy avatar images are read from.
    pub images_dir: &'a Path,
    /// Avatars are copied into `<media_dir>/avatars/`.
    pub media_dir: &'a Path,
    /// Replace profiles whose name already exists instead of skipping them.
    pub force: bool,
    pub now: DateTime<Utc>,
}

/// Adds `profiles` to `list`, copying each avatar it can find.
pub fn import(
    list: &mut ProfileList,
    profiles: &[LegacyProfile],
    opts: &ImportOptions<'_>,
) -> anyhow::Result<ImportReport> {
    let avatars_dir = opts.media_dir.join("avatars");
    std::fs::create_dir_all(&avatars_dir)
        .with_context(|| format!("create {}", avatars_dir.display()))?;

    let mut report = ImportReport::default();
    for legacy in profiles {
        if list.contains_name(legacy.name) {
            if opts.force {
                let removed = list.remove_named(legacy.name);
                tracing::info!(name = legacy.name, removed, "replacing existing profile");
            } else {
                tracing::warn!(name = legacy.name, "skipped: already exists");
                report.skipped += 1;
                continue;
            }
        }

        let src = opts.images_dir.join(legacy.image);
        let avatar = if src.is_file() {
            let dest = avatars_dir.join(legacy.image);
            std::fs::copy(&src, &dest)
                .with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
            Some(format!("avatars/{}", legacy.image))
        } else {
            tracing::warn!(path = %src.display(), "no image file");
            report.missing_images += 1;
            None
        };

        let profile = NewProfile {
            name: legacy.name.to_string(),
            title: legacy.title.to_string(),
            description: legacy.description.to_string(),
            avatar,
        }
        .validate(opts.now)
        .with_context(|| format!("legacy profile {}", legacy.name))?;
        list.profiles.push(profile);
        report.created += 1;
    }
    Ok(report)
}
