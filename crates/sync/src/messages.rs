//! Toast texts shown to users, in the product's language (pt-BR).

use feedboard_events::Toast;

pub(crate) fn suggestions_load_failed() -> Toast {
    Toast::destructive(
        "Erro ao carregar sugestões",
        "Não foi possível carregar as sugestões.",
    )
}

pub(crate) fn suggestion_created() -> Toast {
    Toast::success(
        "Sugestão criada com sucesso!",
        "Sua sugestão foi enviada e está sendo analisada.",
    )
}

pub(crate) fn suggestion_create_failed() -> Toast {
    Toast::destructive(
        "Erro ao criar sugestão",
        "Não foi possível enviar sua sugestão.",
    )
}

pub(crate) fn status_updated() -> Toast {
    Toast::success(
        "Status atualizado",
        "O status da sugestão foi atualizado com sucesso.",
    )
}

pub(crate) fn status_update_failed() -> Toast {
    Toast::destructive(
        "Erro ao atualizar status",
        "Não foi possível atualizar o status da sugestão.",
    )
}

pub(crate) fn vote_failed() -> Toast {
    Toast::destructive("Erro ao votar", "Não foi possível registrar seu voto.")
}

pub(crate) fn roadmap_load_failed() -> Toast {
    Toast::destructive(
        "Erro ao carregar roadmap",
        "Não foi possível carregar os itens do roadmap.",
    )
}

pub(crate) fn roadmap_item_created() -> Toast {
    Toast::success(
        "Item criado com sucesso!",
        "O novo item do roadmap foi adicionado.",
    )
}

pub(crate) fn roadmap_item_create_failed() -> Toast {
    Toast::destructive(
        "Erro ao criar item",
        "Não foi possível criar o item do roadmap.",
    )
}

pub(crate) fn reaction_failed() -> Toast {
    Toast::destructive("Erro ao reagir", "Não foi possível registrar sua reação.")
}

pub(crate) fn changelog_load_failed() -> Toast {
    Toast::destructive(
        "Erro ao carregar changelog",
        "Não foi possível carregar o histórico de mudanças.",
    )
}

pub(crate) fn changelog_created() -> Toast {
    Toast::success(
        "Changelog criado com sucesso!",
        "A nova entrada do changelog foi adicionada.",
    )
}

pub(crate) fn changelog_create_failed() -> Toast {
    Toast::destructive(
        "Erro ao criar changelog",
        "Não foi possível criar a entrada do changelog.",
    )
}
