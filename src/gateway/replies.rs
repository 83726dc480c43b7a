//! Fixed MarkdownV2 replies.

/// Sent when a rendered report could not be delivered.
pub(super) const PROCESSING_ERROR: &str = "😔 Произошла ошибка при обработке вашего сообщения\\. \
     Пожалуйста, попробуйте ещё раз или отправьте /help для справки\\.";

/// Sent when the message handler itself crashed.
pub(super) const CRITICAL_ERROR: &str = "😔 Произошла критическая ошибка при обработке вашего сообщения\\. \
     Пожалуйста, попробуйте ещё раз\\.";

/// Answer to `/start` and `/help`.
pub(super) const HELP: &str = "👋 Пришлите отчет о трудозатратах, и я превращу его в анонс для стендапа\\.\n\
\n\
Формат отчета:\n\
```\n\
Отчет о трудозатратах за 05.01.2024\n\
\n\
1. ABC-123: Описание задачи\n\
продолжение описания\n\
⏱ 2h\n\
2. ABC-124: Следующая задача\n\
⏱ 1h\n\
```\n\
Задачи начинаются с номера и кода вида `ABC-123`, строка с ⏱ завершает описание\\.";
